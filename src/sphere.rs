use glam::Vec3;

use crate::camera::Ray;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Vec3,
}

/// Real roots of `a*t^2 + b*t + c = 0`, smaller root first.
///
/// `a` must be non-zero, which holds for every ray direction used here.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let d = b * b - 4.0 * a * c;

    if d < 0.0 {
        return None;
    }

    let den = 1.0 / (2.0 * a);
    let x1 = (-b - d.sqrt()) * den;
    let x2 = (-b + d.sqrt()) * den;

    Some((x1, x2))
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, color: Vec3) -> Sphere {
        Sphere {
            center,
            radius,
            color,
        }
    }

    /// Tests the ray against the sphere and, on a hit, moves `ray.max_t`
    /// to the entry point (or the exit point when the ray starts inside).
    pub fn intersect(&self, ray: &mut Ray) -> bool {
        // |o + t*d|^2 = r^2 with o relative to the sphere center
        let origin = ray.origin - self.center;
        let direction = ray.direction;

        let a = direction.dot(direction);
        let b = 2.0 * origin.dot(direction);
        let c = origin.dot(origin) - self.radius * self.radius;

        match solve_quadratic(a, b, c) {
            Some((t0, t1)) => {
                if t0 > ray.max_t || t1 < 0.0 {
                    return false;
                }

                ray.max_t = if t0 > 0.0 { t0 } else { t1 };
                true
            }
            None => false,
        }
    }
}
