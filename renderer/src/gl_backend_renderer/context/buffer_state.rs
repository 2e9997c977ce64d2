use super::super::{gl, GraphicsDriver};
use super::{BindingSlot, GpuHandle, SlotKind};
use std::rc::Rc;

/// A GL buffer object. The same object may serve as vertex or index storage;
/// what it is depends on the slot it is bound to.
#[derive(Debug, Default, PartialEq)]
pub struct GLBuffer(pub GpuHandle);

impl GLBuffer {
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

pub struct BufferState<D: GraphicsDriver> {
    driver: Rc<D>,
    vertex_slot: BindingSlot,
    index_slot: BindingSlot,
}

impl<D: GraphicsDriver> BufferState<D> {
    pub fn build_initialized(driver: Rc<D>) -> Self {
        Self {
            driver,
            vertex_slot: BindingSlot::new(SlotKind::VertexBuffer),
            index_slot: BindingSlot::new(SlotKind::IndexBuffer),
        }
    }

    pub fn vertex_slot(&self) -> &BindingSlot {
        &self.vertex_slot
    }

    pub fn index_slot(&self) -> &BindingSlot {
        &self.index_slot
    }

    pub fn create_buffer(&self) -> GLBuffer {
        let buffer = GpuHandle::from_raw(self.driver.gen_buffer());
        log::debug!("created buffer {}", buffer);
        GLBuffer(buffer)
    }

    pub fn destroy_buffer(&self, buffer: &mut GLBuffer) {
        assert!(!buffer.is_null(), "cannot destroy a null buffer");
        assert!(
            self.vertex_slot.occupant() != Some(buffer.0)
                && self.index_slot.occupant() != Some(buffer.0),
            "buffer {} is still bound",
            buffer.0
        );

        self.driver.delete_buffer(buffer.0.raw());
        log::debug!("destroyed buffer {}", buffer.0);
        buffer.0 = GpuHandle::NULL;
    }

    pub fn bind_vertex_buffer(&mut self, buffer: &GLBuffer) -> &mut Self {
        self.vertex_slot.occupy(buffer.0);
        self.driver.bind_buffer(gl::ARRAY_BUFFER, buffer.0.raw());

        self
    }

    pub fn unbind_vertex_buffer(&mut self, buffer: &GLBuffer) {
        self.vertex_slot.release(buffer.0);
        self.driver.bind_buffer(gl::ARRAY_BUFFER, 0);
    }

    pub fn bind_index_buffer(&mut self, buffer: &GLBuffer) -> &mut Self {
        self.index_slot.occupy(buffer.0);
        self.driver.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, buffer.0.raw());

        self
    }

    pub fn unbind_index_buffer(&mut self, buffer: &GLBuffer) {
        self.index_slot.release(buffer.0);
        self.driver.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, 0);
    }

    /// Replaces the whole store of the bound vertex buffer. Uploads are static.
    pub fn update_vertex_buffer<T: bytemuck::Pod>(&mut self, data: &[T]) -> &mut Self {
        self.vertex_slot.expect_occupant("uploading vertex data");
        self.driver
            .buffer_data(gl::ARRAY_BUFFER, bytemuck::cast_slice(data), gl::STATIC_DRAW);

        self
    }

    pub fn update_index_buffer(&mut self, data: &[u16]) -> &mut Self {
        self.index_slot.expect_occupant("uploading index data");
        self.driver.buffer_data(
            gl::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(data),
            gl::STATIC_DRAW,
        );

        self
    }
}
