use bevy::prelude::*;

use crate::engine::camera::view_mode::{CameraViewMode, CameraViewState, SetCameraViewEvent};

use super::state::{
    CoordinateSpace, CoordinateSpaceEvent, FloorplanConfig, FloorplanState, ManipulationMode,
    ManipulationStrategy, ModeSelectionEvent, SelectionSource,
};

// Resources
#[derive(Resource)]
pub struct SettingsUiState {
    pub collapsed: bool,
    pub open_width: f32,
    pub closed_width: f32,
}
impl Default for SettingsUiState {
    fn default() -> Self {
        Self {
            collapsed: false,
            open_width: 220.0,
            closed_width: 32.0,
        }
    }
}

// Components
#[derive(Component)]
pub struct SettingsPanelRoot;
#[derive(Component)]
pub struct SettingsPanelBody;
#[derive(Component)]
pub struct HeaderNode;
#[derive(Component)]
pub struct TitleText;
#[derive(Component)]
pub struct CollapseButton;
#[derive(Component)]
pub struct CollapseLabel;
#[derive(Component)]
pub struct ModeButton(pub ManipulationMode);
#[derive(Component)]
pub struct CameraViewButton;
#[derive(Component)]
pub struct CameraViewLabel;
#[derive(Component)]
pub struct SpaceButton;
#[derive(Component)]
pub struct SpaceLabel;

fn panel_button(width: Val) -> Node {
    Node {
        width,
        height: Val::Px(32.0),
        display: Display::Flex,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

// Spawns the settings panel with the mode selector and view toggles
pub fn spawn_settings_panel(
    mut commands: Commands,
    state: Res<SettingsUiState>,
    config: Res<FloorplanConfig>,
) {
    let width = if state.collapsed { state.closed_width } else { state.open_width };
    let body_display = if state.collapsed { Display::None } else { Display::Flex };

    commands
        .spawn((
            SettingsPanelRoot,
            Name::new("FloorplanSettingsPanel"),
            BackgroundColor(Color::srgb(0.10, 0.11, 0.13)),
            Node {
                width: Val::Px(width),
                min_width: Val::Px(0.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                justify_content: JustifyContent::FlexStart,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            let (pad, btn) = if state.collapsed { (4.0, 24.0) } else { (12.0, 28.0) };

            parent
                .spawn((
                    HeaderNode,
                    Name::new("Header"),
                    BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(pad)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: if state.collapsed {
                            JustifyContent::FlexEnd
                        } else {
                            JustifyContent::SpaceBetween
                        },
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        TitleText,
                        Name::new("Title"),
                        Text::new("Floorplan"),
                        TextFont { font_size: 18.0, ..default() },
                        TextColor(Color::srgb(1.0, 1.0, 1.0)),
                        Node {
                            display: if state.collapsed { Display::None } else { Display::Flex },
                            ..default()
                        },
                    ));

                    let chevron = if state.collapsed { ">" } else { "<" };
                    header
                        .spawn((
                            CollapseButton,
                            Name::new("CollapseButton"),
                            Button,
                            BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            Node {
                                width: Val::Px(btn),
                                height: Val::Px(btn),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                        ))
                        .with_children(|btn_parent| {
                            btn_parent.spawn((
                                CollapseLabel,
                                Text::new(chevron),
                                TextFont { font_size: 18.0, ..default() },
                                TextColor(Color::srgb(1.0, 1.0, 1.0)),
                            ));
                        });
                });

            parent
                .spawn((
                    SettingsPanelBody,
                    Name::new("Body"),
                    BackgroundColor(Color::srgb(0.12, 0.13, 0.15)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        row_gap: Val::Px(8.0),
                        display: body_display,
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    body.spawn((
                        Text::new("Tool Mode"),
                        TextFont { font_size: 14.0, ..default() },
                        TextColor(Color::srgb(0.8, 0.8, 0.8)),
                    ));

                    for (mode, label) in [
                        (ManipulationMode::None, "None"),
                        (ManipulationMode::Move, "Move"),
                        (ManipulationMode::Rotate, "Rotate"),
                        (ManipulationMode::Resize, "Resize"),
                    ] {
                        body.spawn((
                            ModeButton(mode),
                            Button,
                            Name::new(format!("ModeButton_{label}")),
                            BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            panel_button(Val::Percent(100.0)),
                        ))
                        .with_children(|btn| {
                            btn.spawn((
                                Text::new(label),
                                TextFont { font_size: 16.0, ..default() },
                                TextColor(Color::srgb(1.0, 1.0, 1.0)),
                            ));
                        });
                    }

                    body.spawn((
                        CameraViewButton,
                        Button,
                        Name::new("CameraViewButton"),
                        BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                        BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                        panel_button(Val::Percent(100.0)),
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            CameraViewLabel,
                            Text::new("2D View: Off"),
                            TextFont { font_size: 16.0, ..default() },
                            TextColor(Color::srgb(1.0, 1.0, 1.0)),
                        ));
                    });

                    // The coordinate-space selector only exists for the
                    // delegated gizmo; custom handles are always local.
                    if config.strategy == ManipulationStrategy::DelegatedGizmo {
                        body.spawn((
                            SpaceButton,
                            Button,
                            Name::new("SpaceButton"),
                            BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            panel_button(Val::Percent(100.0)),
                        ))
                        .with_children(|btn| {
                            btn.spawn((
                                SpaceLabel,
                                Text::new("Space: Local"),
                                TextFont { font_size: 16.0, ..default() },
                                TextColor(Color::srgb(1.0, 1.0, 1.0)),
                            ));
                        });
                    }
                });
        });
}

// Chevron icon toggles collapse state
pub fn collapse_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<CollapseButton>),
    >,
    mut state: ResMut<SettingsUiState>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                state.collapsed = !state.collapsed;
                *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

pub fn apply_collapse_state(
    state: Res<SettingsUiState>,
    mut nodes: ParamSet<(
        Query<&mut Node, With<SettingsPanelRoot>>,
        Query<&mut Node, With<SettingsPanelBody>>,
        Query<&mut Node, With<HeaderNode>>,
        Query<&mut Node, With<TitleText>>,
        Query<&mut Node, With<CollapseButton>>,
    )>,
    mut chevrons: Query<&mut Text, With<CollapseLabel>>,
) {
    if !state.is_changed() {
        return;
    }

    if let Ok(mut n) = nodes.p0().single_mut() {
        n.width = Val::Px(if state.collapsed { state.closed_width } else { state.open_width });
    }
    if let Ok(mut n) = nodes.p1().single_mut() {
        n.display = if state.collapsed { Display::None } else { Display::Flex };
    }
    if let Ok(mut n) = nodes.p2().single_mut() {
        let pad = if state.collapsed { 4.0 } else { 12.0 };
        n.padding = UiRect::all(Val::Px(pad));
        n.justify_content = if state.collapsed {
            JustifyContent::FlexEnd
        } else {
            JustifyContent::SpaceBetween
        };
    }
    if let Ok(mut n) = nodes.p3().single_mut() {
        n.display = if state.collapsed { Display::None } else { Display::Flex };
    }
    if let Ok(mut n) = nodes.p4().single_mut() {
        let s = if state.collapsed { 24.0 } else { 28.0 };
        n.width = Val::Px(s);
        n.height = Val::Px(s);
    }
    for mut t in &mut chevrons {
        *t = Text::new(if state.collapsed { ">" } else { "<" });
    }
}

// Mode buttons request a mode change; the shared event handler applies it
pub fn mode_button_interaction(
    mut q: Query<
        (&Interaction, &ModeButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    floorplan: Res<FloorplanState>,
    mut events: EventWriter<ModeSelectionEvent>,
) {
    for (interaction, button, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                events.write(ModeSelectionEvent {
                    mode: button.0,
                    source: SelectionSource::Panel,
                });
                *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => {
                *bg = BackgroundColor(if floorplan.mode == button.0 {
                    Color::srgb(0.30, 0.34, 0.40)
                } else {
                    Color::srgb(0.22, 0.24, 0.28)
                })
            }
        }
    }
}

// Highlight the active mode's button whenever the mode changes
pub fn reflect_mode_buttons(
    floorplan: Res<FloorplanState>,
    mut q: Query<(&ModeButton, &mut BackgroundColor)>,
) {
    if !floorplan.is_changed() {
        return;
    }
    for (button, mut bg) in &mut q {
        *bg = BackgroundColor(if floorplan.mode == button.0 {
            Color::srgb(0.30, 0.34, 0.40)
        } else {
            Color::srgb(0.22, 0.24, 0.28)
        });
    }
}

pub fn camera_view_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<CameraViewButton>),
    >,
    view_state: Res<CameraViewState>,
    mut events: EventWriter<SetCameraViewEvent>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                events.write(SetCameraViewEvent {
                    top_down: view_state.mode == CameraViewMode::ThreeD,
                });
                *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => {
                *bg = BackgroundColor(if view_state.mode == CameraViewMode::TopDown {
                    Color::srgb(0.30, 0.34, 0.40)
                } else {
                    Color::srgb(0.22, 0.24, 0.28)
                })
            }
        }
    }
}

pub fn reflect_camera_view_button(
    view_state: Res<CameraViewState>,
    mut labels: Query<&mut Text, With<CameraViewLabel>>,
) {
    if !view_state.is_changed() {
        return;
    }
    let label = match view_state.mode {
        CameraViewMode::TopDown => "2D View: On",
        CameraViewMode::ThreeD => "2D View: Off",
    };
    for mut text in &mut labels {
        if text.0 != label {
            *text = Text::new(label);
        }
    }
}

pub fn space_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<SpaceButton>),
    >,
    floorplan: Res<FloorplanState>,
    mut events: EventWriter<CoordinateSpaceEvent>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                let next = match floorplan.space {
                    CoordinateSpace::Local => CoordinateSpace::World,
                    CoordinateSpace::World => CoordinateSpace::Local,
                };
                events.write(CoordinateSpaceEvent { space: next });
                *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

pub fn reflect_space_button(
    floorplan: Res<FloorplanState>,
    mut labels: Query<&mut Text, With<SpaceLabel>>,
) {
    if !floorplan.is_changed() {
        return;
    }
    let label = match floorplan.space {
        CoordinateSpace::Local => "Space: Local",
        CoordinateSpace::World => "Space: World",
    };
    for mut text in &mut labels {
        if text.0 != label {
            *text = Text::new(label);
        }
    }
}
