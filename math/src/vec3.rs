// REF:: https://github.com/mrdoob/three.js/blob/dev/src/math/Vector3.js

use super::{lerp, one_when_zero};
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn from_components(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_scalar(s: f32) -> Self {
        Self { x: s, y: s, z: s }
    }

    pub fn unit_x() -> Self {
        Self::from_components(1.0, 0.0, 0.0)
    }

    pub fn unit_y() -> Self {
        Self::from_components(0.0, 1.0, 0.0)
    }

    pub fn unit_z() -> Self {
        Self::from_components(0.0, 0.0, 1.0)
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    // Scalar Operations

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn multiply_scalar(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }

    pub fn divide_scalar(&mut self, scalar: f32) {
        self.multiply_scalar(1.0 / scalar);
    }

    pub fn normalize(&mut self) {
        self.divide_scalar(one_when_zero(self.length()));
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    // Cross

    pub fn from_cross(a: &Vec3, b: &Vec3) -> Self {
        Self::from_components(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    pub fn add(&mut self, v: &Vec3) {
        let x = self.x + v.x;
        let y = self.y + v.y;
        let z = self.z + v.z;

        self.set(x, y, z);
    }

    pub fn from_add_vectors(a: &Vec3, b: &Vec3) -> Self {
        Self::from_components(a.x + b.x, a.y + b.y, a.z + b.z)
    }

    pub fn from_sub_vectors(a: &Vec3, b: &Vec3) -> Self {
        Self::from_components(a.x - b.x, a.y - b.y, a.z - b.z)
    }

    pub fn dot(&self, v: &Vec3) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn from_lerp(a: &Vec3, b: &Vec3, t: f32) -> Self {
        Self::from_components(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_of_axes_is_third_axis() {
        assert_eq!(Vec3::from_cross(&Vec3::unit_x(), &Vec3::unit_y()), Vec3::unit_z());
    }

    #[test]
    fn normalizing_zero_leaves_zero() {
        assert_eq!(Vec3::new().normalized(), Vec3::new());
    }

    #[test]
    fn lerp_hits_both_ends() {
        let a = Vec3::from_components(0.0, 1.0, 2.0);
        let b = Vec3::from_components(2.0, 3.0, 4.0);

        assert_eq!(Vec3::from_lerp(&a, &b, 0.0), a);
        assert_eq!(Vec3::from_lerp(&a, &b, 1.0), b);
        assert_eq!(
            Vec3::from_lerp(&a, &b, 0.5),
            Vec3::from_components(1.0, 2.0, 3.0)
        );
    }
}
