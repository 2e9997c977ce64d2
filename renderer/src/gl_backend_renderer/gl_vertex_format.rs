use super::gl;
use math::{Vec2, Vec3};
use std::fmt;

/// Per-vertex element type stored in its own buffer.
///
/// Vertex data is never interleaved, so the stride of an attribute is the size
/// of one element and its offset is always zero.
pub trait VertexAttribute: bytemuck::Pod {
    fn type_() -> gl::GLenum;
    fn normalized() -> bool;
    fn size() -> i32;

    fn stride() -> gl::GLsizei {
        std::mem::size_of::<Self>() as gl::GLsizei
    }
}

impl VertexAttribute for Vec2 {
    fn type_() -> gl::GLenum {
        gl::FLOAT
    }
    fn normalized() -> bool {
        false
    }
    fn size() -> i32 {
        2
    }
}

impl VertexAttribute for Vec3 {
    fn type_() -> gl::GLenum {
        gl::FLOAT
    }
    fn normalized() -> bool {
        false
    }
    fn size() -> i32 {
        3
    }
}

/// Fixed attribute locations shared by every mesh and shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Position, Attribute::TexCoord, Attribute::Normal];

    pub fn location(self) -> gl::GLuint {
        match self {
            Attribute::Position => 0,
            Attribute::TexCoord => 1,
            Attribute::Normal => 2,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Attribute::Position => write!(f, "positions"),
            Attribute::TexCoord => write!(f, "texture coordinates"),
            Attribute::Normal => write!(f, "normals"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_one_element() {
        assert_eq!(Vec3::stride(), 12);
        assert_eq!(Vec2::stride(), 8);
        assert_eq!(<Vec3 as VertexAttribute>::size(), 3);
    }

    #[test]
    fn locations_are_fixed() {
        let locations: Vec<_> = Attribute::ALL.iter().map(|a| a.location()).collect();
        assert_eq!(locations, vec![0, 1, 2]);
    }
}
