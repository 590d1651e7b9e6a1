use bevy::input::mouse::MouseScrollUnit;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};
use constants::interaction::{
    ORBIT_MIN_DISTANCE, ORBIT_PAN_FACTOR, ORBIT_ROTATE_SENSITIVITY, ORBIT_ZOOM_FACTOR,
};

/// Orbit-style camera input handler. The view mode toggle and the drag
/// sessions flip the enable flags; the controller only ever applies input
/// that the flags permit.
#[derive(Resource)]
pub struct OrbitControls {
    pub target: Vec3,
    pub up: Vec3,
    pub enabled: bool,
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            up: Vec3::Y,
            enabled: true,
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
            min_polar_angle: 0.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2,
        }
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut controls: ResMut<OrbitControls>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    // Read mouse motion
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    // Mouse wheel scroll accumulation (pixel and line scroll)
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    if !controls.enabled {
        return;
    }

    // Orbit with left drag
    if controls.enable_rotate && mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO
    {
        let offset = camera_transform.translation - controls.target;
        let rotated = orbit_offset(
            offset,
            -mouse_delta.x * ORBIT_ROTATE_SENSITIVITY,
            -mouse_delta.y * ORBIT_ROTATE_SENSITIVITY,
            controls.min_polar_angle,
            controls.max_polar_angle,
        );
        camera_transform.translation = controls.target + rotated;
        let target = controls.target;
        let up = controls.up;
        camera_transform.look_at(target, up);
    }

    // Pan with right drag, screen-aligned
    if controls.enable_pan && mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        let distance = camera_transform.translation.distance(controls.target);
        let right = camera_transform.right();
        let up = camera_transform.up();
        let pan = (right * -mouse_delta.x + up * mouse_delta.y) * (distance * ORBIT_PAN_FACTOR);
        controls.target += pan;
        camera_transform.translation += pan;
    }

    // Dolly on scroll
    if controls.enable_zoom && scroll_accum.abs() > f32::EPSILON {
        let offset = camera_transform.translation - controls.target;
        let scaled = offset * (1.0 - scroll_accum * ORBIT_ZOOM_FACTOR).max(0.0);
        let clamped = if scaled.length() < ORBIT_MIN_DISTANCE {
            offset.normalize_or_zero() * ORBIT_MIN_DISTANCE
        } else {
            scaled
        };
        camera_transform.translation = controls.target + clamped;
    }
}

/// Rotate the camera offset around the target in spherical coordinates,
/// clamping the polar angle to the controls' bounds. Polar is measured
/// from the +Y axis; an epsilon keeps the offset off the pole so look_at
/// stays well defined.
pub fn orbit_offset(
    offset: Vec3,
    yaw_delta: f32,
    pitch_delta: f32,
    min_polar: f32,
    max_polar: f32,
) -> Vec3 {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return offset;
    }

    let mut theta = offset.x.atan2(offset.z);
    let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

    theta += yaw_delta;
    phi = (phi + pitch_delta).clamp(min_polar.max(1.0e-3), max_polar.max(1.0e-3));

    radius * Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_preserves_radius() {
        let offset = Vec3::new(0.0, 4.5, 9.0);
        let rotated = orbit_offset(offset, 0.3, -0.2, 0.0, std::f32::consts::FRAC_PI_2);
        assert!((rotated.length() - offset.length()).abs() < 1.0e-4);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let offset = Vec3::new(0.0, 1.0, 5.0);
        let rotated = orbit_offset(offset, 0.0, 10.0, 0.0, std::f32::consts::FRAC_PI_2);
        // A huge pitch delta must stop at the horizon, not flip below it.
        assert!(rotated.y >= -1.0e-3);
    }

    #[test]
    fn zero_offset_is_left_alone() {
        assert_eq!(orbit_offset(Vec3::ZERO, 0.5, 0.5, 0.0, 1.0), Vec3::ZERO);
    }
}
