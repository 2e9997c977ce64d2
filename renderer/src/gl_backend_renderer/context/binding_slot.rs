use super::super::gl;
use std::fmt;

/// Driver-issued name of a vertex array, buffer, texture, shader or program.
///
/// [`GpuHandle::NULL`] means "not allocated". A live handle must be released
/// exactly once; releasing it resets the owner's copy to null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GpuHandle(gl::GLuint);

impl GpuHandle {
    pub const NULL: GpuHandle = GpuHandle(0);

    pub fn from_raw(name: gl::GLuint) -> Self {
        GpuHandle(name)
    }

    pub fn raw(self) -> gl::GLuint {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for GpuHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    VertexArray,
    VertexBuffer,
    IndexBuffer,
    Texture,
    Program,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SlotKind::VertexArray => "vertex array",
            SlotKind::VertexBuffer => "vertex buffer",
            SlotKind::IndexBuffer => "index buffer",
            SlotKind::Texture => "texture",
            SlotKind::Program => "shader program",
        };

        f.write_str(name)
    }
}

/// Records which handle currently occupies one binding point.
///
/// A bind on an occupied slot, or an unbind naming anything but the occupant,
/// is a programming error and panics.
#[derive(Debug)]
pub struct BindingSlot {
    kind: SlotKind,
    occupant: Option<GpuHandle>,
}

impl BindingSlot {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            occupant: None,
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn occupant(&self) -> Option<GpuHandle> {
        self.occupant
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn occupy(&mut self, handle: GpuHandle) {
        assert!(
            !handle.is_null(),
            "cannot bind the null handle to the {} slot",
            self.kind
        );

        if let Some(current) = self.occupant {
            panic!(
                "{} slot already holds {}; unbind it before binding {}",
                self.kind, current, handle
            );
        }

        log::trace!("bind {} {}", self.kind, handle);
        self.occupant = Some(handle);
    }

    pub fn release(&mut self, handle: GpuHandle) {
        match self.occupant {
            None => panic!("{} slot is empty; cannot unbind {}", self.kind, handle),
            Some(current) if current != handle => panic!(
                "{} slot holds {}, not {}; unbind the occupant instead",
                self.kind, current, handle
            ),
            Some(_) => {
                log::trace!("unbind {} {}", self.kind, handle);
                self.occupant = None;
            }
        }
    }

    /// Returns the occupant, panicking when the slot is empty.
    pub fn expect_occupant(&self, what: &str) -> GpuHandle {
        match self.occupant {
            Some(handle) => handle,
            None => panic!("{} requires a bound {}", what, self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbind_frees_the_slot() {
        let mut slot = BindingSlot::new(SlotKind::VertexArray);
        let handle = GpuHandle::from_raw(7);

        slot.occupy(handle);
        assert_eq!(slot.occupant(), Some(handle));

        slot.release(handle);
        assert!(slot.is_empty());

        slot.occupy(GpuHandle::from_raw(8));
        assert_eq!(slot.occupant(), Some(GpuHandle::from_raw(8)));
    }

    #[test]
    #[should_panic(expected = "vertex array slot already holds 1; unbind it before binding 2")]
    fn second_bind_panics() {
        let mut slot = BindingSlot::new(SlotKind::VertexArray);
        slot.occupy(GpuHandle::from_raw(1));
        slot.occupy(GpuHandle::from_raw(2));
    }

    #[test]
    #[should_panic(expected = "texture slot holds 1, not 2")]
    fn unbind_of_other_handle_panics() {
        let mut slot = BindingSlot::new(SlotKind::Texture);
        slot.occupy(GpuHandle::from_raw(1));
        slot.release(GpuHandle::from_raw(2));
    }

    #[test]
    #[should_panic(expected = "index buffer slot is empty")]
    fn unbind_of_empty_slot_panics() {
        let mut slot = BindingSlot::new(SlotKind::IndexBuffer);
        slot.release(GpuHandle::from_raw(1));
    }

    #[test]
    #[should_panic(expected = "cannot bind the null handle")]
    fn null_handle_cannot_be_bound() {
        BindingSlot::new(SlotKind::Program).occupy(GpuHandle::NULL);
    }
}
