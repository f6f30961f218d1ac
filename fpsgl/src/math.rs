use cgmath::{Angle, Deg, InnerSpace, Vector3};

pub fn sin_deg(x: f32) -> f32 {
    Deg(x).sin()
}

pub fn cos_deg(x: f32) -> f32 {
    Deg(x).cos()
}

/// Maps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(x: f32) -> f32 {
    let wrapped = x.rem_euclid(360.0);

    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Unit normal of a counter-clockwise triangle.
pub fn triangle_normal(p1: Vector3<f32>, p2: Vector3<f32>, p3: Vector3<f32>) -> Vector3<f32> {
    let u = p2 - p1;
    let v = p3 - p1;

    u.cross(v).normalize()
}
