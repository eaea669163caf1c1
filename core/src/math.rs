//! nalgebra aliases and the array/matrix conversions used by skinning and space transforms.
//!
//! Vertex data travels through the pipeline as plain `[f32; 3]` arrays.
//! The helpers here convert to nalgebra types wherever a transform has to
//! be applied and back again.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Quaternion; rig files store it as `[x, y, z, w]`.
/// Use [`quat_from_array`] or `Quaternion::new(w, x, y, z)` to construct.
pub type Quat = nalgebra::Quaternion<f32>;

/// Unit quaternion (f32) used for rotations.
pub type UnitQuat = nalgebra::UnitQuaternion<f32>;

/// Affine matrix that scales, then rotates, then translates.
pub fn mat4_from_scale_rotation_translation(
    scale: Vec3,
    rotation: Quat,
    translation: Vec3,
) -> Mat4 {
    let r = UnitQuat::from_quaternion(rotation);
    let m = r.to_rotation_matrix();
    let rm = m.matrix();
    #[rustfmt::skip]
    let result = Mat4::new(
        rm[(0, 0)] * scale.x, rm[(0, 1)] * scale.y, rm[(0, 2)] * scale.z, translation.x,
        rm[(1, 0)] * scale.x, rm[(1, 1)] * scale.y, rm[(1, 2)] * scale.z, translation.y,
        rm[(2, 0)] * scale.x, rm[(2, 1)] * scale.y, rm[(2, 2)] * scale.z, translation.z,
        0.0,                  0.0,                  0.0,                  1.0,
    );
    result
}

/// Quaternion from its serialized `[x, y, z, w]` layout.
pub fn quat_from_array(a: [f32; 4]) -> Quat {
    nalgebra::Quaternion::new(a[3], a[0], a[1], a[2])
}

/// Quaternion back to its serialized `[x, y, z, w]` layout.
pub fn quat_to_array(q: Quat) -> [f32; 4] {
    [q.coords.x, q.coords.y, q.coords.z, q.coords.w]
}

/// Rotation of `angle` radians around `axis`, as a `[x, y, z, w]` array.
///
/// A zero-length axis yields the identity rotation.
pub fn quat_array_from_axis_angle(axis: [f32; 3], angle: f32) -> [f32; 4] {
    match nalgebra::Unit::try_new(Vec3::from(axis), f32::EPSILON) {
        Some(axis) => quat_to_array(UnitQuat::from_axis_angle(&axis, angle).into_inner()),
        None => [0.0, 0.0, 0.0, 1.0],
    }
}

/// Spherical interpolation between two `[x, y, z, w]` rotations.
pub fn slerp_array(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let qa = UnitQuat::from_quaternion(quat_from_array(a));
    let qb = UnitQuat::from_quaternion(quat_from_array(b));
    // Near-opposite rotations have no unique great arc; fall back to nlerp.
    match qa.try_slerp(&qb, t, 1.0e-6) {
        Some(q) => quat_to_array(q.into_inner()),
        None => quat_to_array(qa.nlerp(&qb, t).into_inner()),
    }
}

/// Component-wise linear interpolation.
pub fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Transform a point by an affine 4x4 matrix.
pub fn transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 3] {
    let out = m.transform_point(&nalgebra::Point3::from(Vec3::from(p)));
    [out.x, out.y, out.z]
}

/// Transform a direction by the linear part of an affine 4x4 matrix.
pub fn transform_vector(m: &Mat4, v: [f32; 3]) -> [f32; 3] {
    let out = m.transform_vector(&Vec3::from(v));
    [out.x, out.y, out.z]
}

/// Normalize a vector, returning zero for degenerate input.
pub fn normalize_or_zero(v: [f32; 3]) -> [f32; 3] {
    let v = Vec3::from(v);
    let len = v.norm();
    if len > f32::EPSILON && len.is_finite() {
        let n = v / len;
        [n.x, n.y, n.z]
    } else {
        [0.0; 3]
    }
}

/// Smallest power of two greater than or equal to `n` (at least 1).
pub fn next_power_of_two(n: u32) -> u32 {
    n.max(1).next_power_of_two()
}

/// Linearly map `value` from the range `[from1, to1]` onto `[from2, to2]`.
pub fn remap(value: f32, from1: f32, to1: f32, from2: f32, to2: f32) -> f32 {
    (value - from1) / (to1 - from1) * (to2 - from2) + from2
}
