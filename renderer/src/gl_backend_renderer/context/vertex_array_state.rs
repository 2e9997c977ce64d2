use super::super::{gl, GraphicsDriver};
use super::{BindingSlot, GpuHandle, SlotKind};
use std::rc::Rc;

#[derive(Debug, Default, PartialEq)]
pub struct GLVertexArray(pub GpuHandle);

impl GLVertexArray {
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

pub struct VertexArrayState<D: GraphicsDriver> {
    driver: Rc<D>,
    slot: BindingSlot,
}

impl<D: GraphicsDriver> VertexArrayState<D> {
    pub fn build_initialized(driver: Rc<D>) -> Self {
        Self {
            driver,
            slot: BindingSlot::new(SlotKind::VertexArray),
        }
    }

    pub fn slot(&self) -> &BindingSlot {
        &self.slot
    }

    pub fn create(&self) -> GLVertexArray {
        let vao = GpuHandle::from_raw(self.driver.gen_vertex_array());
        log::debug!("created vertex array {}", vao);
        GLVertexArray(vao)
    }

    pub fn destroy(&self, vao: &mut GLVertexArray) {
        assert!(!vao.is_null(), "cannot destroy a null vertex array");
        assert!(
            self.slot.occupant() != Some(vao.0),
            "vertex array {} is still bound",
            vao.0
        );

        self.driver.delete_vertex_array(vao.0.raw());
        log::debug!("destroyed vertex array {}", vao.0);
        vao.0 = GpuHandle::NULL;
    }

    pub fn bind(&mut self, vao: &GLVertexArray) -> &mut Self {
        self.slot.occupy(vao.0);
        self.driver.bind_vertex_array(vao.0.raw());

        self
    }

    pub fn unbind(&mut self, vao: &GLVertexArray) {
        self.slot.release(vao.0);
        self.driver.bind_vertex_array(0);
    }

    /// Attribute switches are recorded in the bound vertex array.
    pub fn enable_attribute(&mut self, index: u32) -> &mut Self {
        self.slot.expect_occupant("enabling a vertex attribute");
        self.driver.enable_vertex_attrib_array(index);

        self
    }

    pub fn disable_attribute(&mut self, index: u32) -> &mut Self {
        self.slot.expect_occupant("disabling a vertex attribute");
        self.driver.disable_vertex_attrib_array(index);

        self
    }

    pub fn draw_triangles(&self, vertex_count: usize) {
        self.slot.expect_occupant("drawing triangles");
        self.driver
            .draw_arrays(gl::TRIANGLES, 0, vertex_count as gl::GLsizei);
    }

    /// Indices are always 16-bit.
    pub fn draw_indexed_triangles(&self, index_count: usize) {
        self.slot.expect_occupant("drawing indexed triangles");
        self.driver.draw_elements(
            gl::TRIANGLES,
            index_count as gl::GLsizei,
            gl::UNSIGNED_SHORT,
        );
    }
}
