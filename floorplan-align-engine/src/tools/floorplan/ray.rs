use bevy::prelude::*;

/// Ray test against an oriented box given as a transform plus full extents.
/// The ray is moved into the box's local frame and tested with the slab
/// method.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, xf: &GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = size * 0.5;
    ray_aabb_hit_t(o_local, d_local, -he, he)
}

/// Ray test against a flat annulus lying in the local XY plane of `xf`.
/// Intersects the plane first, then checks the hit radius against the band.
pub fn ray_hits_ring(
    origin: Vec3,
    dir: Vec3,
    xf: &GlobalTransform,
    inner: f32,
    outer: f32,
) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);

    if d_local.z.abs() < 1.0e-6 {
        return None;
    }
    let t = -o_local.z / d_local.z;
    if t <= 0.0 {
        return None;
    }

    let hit = o_local + d_local * t;
    let r = hit.truncate().length();
    (inner..=outer).contains(&r).then_some(t)
}

/// Closest approach between a ray and a line segment. Returns the distance
/// and the ray parameter at the closest point; used for picking the drawn
/// gizmo axes, which have no mesh to raycast against.
pub fn ray_segment_closest(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3) -> (f32, f32) {
    let seg = b - a;
    let w0 = origin - a;

    let aa = dir.dot(dir);
    let bb = dir.dot(seg);
    let cc = seg.dot(seg);
    let dd = dir.dot(w0);
    let ee = seg.dot(w0);

    let denom = aa * cc - bb * bb;
    let (mut t_ray, s_seg) = if denom.abs() < 1.0e-9 {
        // Near-parallel: clamp to the segment start.
        (-dd / aa, 0.0)
    } else {
        let s = ((bb * dd - aa * ee) / denom).clamp(0.0, 1.0);
        (-(dd - bb * s) / aa, s)
    };
    t_ray = t_ray.max(0.0);

    let on_ray = origin + dir * t_ray;
    let on_seg = a + seg * s_seg;
    (on_ray.distance(on_seg), t_ray)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax { std::mem::swap(&mut tmin, &mut tmax); }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax { std::mem::swap(&mut tymin, &mut tymax); }

    if (tmin > tymax) || (tymin > tmax) { return None; }
    if tymin > tmin { tmin = tymin; }
    if tymax < tmax { tmax = tymax; }

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax { std::mem::swap(&mut tzmin, &mut tzmax); }

    if (tmin > tzmax) || (tzmin > tmax) { return None; }
    if tzmin > tmin { tmin = tzmin; }
    if tzmax < tmax { tmax = tzmax; }

    if tmax < 0.0 { return None; }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_hit_from_outside() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn aabb_miss_off_axis() {
        let t = ray_aabb_hit_t(
            Vec3::new(3.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert_eq!(t, None);
    }

    #[test]
    fn obb_respects_the_transform() {
        let xf = GlobalTransform::from(Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        let size = Vec3::splat(0.3);
        assert!(ray_hits_obb(Vec3::new(10.0, 0.0, -5.0), Vec3::Z, &xf, size).is_some());
        assert!(ray_hits_obb(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &xf, size).is_none());
    }

    #[test]
    fn ring_band_accepts_only_the_annulus() {
        let xf = GlobalTransform::IDENTITY;
        let dir = Vec3::Z;
        // Through the band.
        assert!(ray_hits_ring(Vec3::new(1.7, 0.0, -5.0), dir, &xf, 1.6, 1.8).is_some());
        // Through the hole.
        assert!(ray_hits_ring(Vec3::new(0.5, 0.0, -5.0), dir, &xf, 1.6, 1.8).is_none());
        // Outside the outer radius.
        assert!(ray_hits_ring(Vec3::new(2.5, 0.0, -5.0), dir, &xf, 1.6, 1.8).is_none());
    }

    #[test]
    fn ring_ignores_rays_parallel_to_its_plane() {
        let xf = GlobalTransform::IDENTITY;
        assert!(ray_hits_ring(Vec3::new(-5.0, 0.0, 1.0), Vec3::X, &xf, 1.6, 1.8).is_none());
    }

    #[test]
    fn segment_distance_to_crossing_ray() {
        // Ray along +Z passing 0.1 above the middle of an X-axis segment.
        let (dist, t) = ray_segment_closest(
            Vec3::new(1.0, 0.1, -5.0),
            Vec3::Z,
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
        );
        assert!((dist - 0.1).abs() < 1.0e-4);
        assert!((t - 5.0).abs() < 1.0e-4);
    }
}
