// REF:: https://github.com/mrdoob/three.js/blob/dev/src/math/Matrix4.js
use super::Vec3;

/// Column-major 4x4 matrix, the storage order GL expects with `transpose = false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub elements: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mat4 {
    pub fn new() -> Self {
        Self {
            #[rustfmt::skip]
            elements: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn from_y_rotation(rad: f32) -> Self {
        let s = rad.sin();
        let c = rad.cos();

        Self {
            #[rustfmt::skip]
            elements: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn set_position(&mut self, v: &Vec3) {
        self.elements[12] = v.x;
        self.elements[13] = v.y;
        self.elements[14] = v.z;
    }

    /// Upper-left 3x3 block, still column-major. The translation column is dropped.
    pub fn to_mat3_elements(&self) -> [f32; 9] {
        let e = &self.elements;

        #[rustfmt::skip]
        let out = [
            e[0], e[1], e[2],
            e[4], e[5], e[6],
            e[8], e[9], e[10],
        ];

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mat3_skips_translation_column() {
        let mut m = Mat4::new();
        m.set_position(&Vec3::from_components(7.0, 8.0, 9.0));

        assert_eq!(&m.elements[12..15], &[7.0, 8.0, 9.0]);
        assert_eq!(
            m.to_mat3_elements(),
            [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn y_rotation_leaves_the_y_axis() {
        let m = Mat4::from_y_rotation(0.3);

        assert_eq!(&m.elements[4..8], &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(m.elements[0], 0.3f32.cos());
        assert_eq!(m.elements[8], 0.3f32.sin());
    }
}
