use super::super::{gl, GraphicsDriver, VertexAttribute};
use super::{BufferState, ProgramState, TextureState, VertexArrayState};
use crate::{Warning, WarningPolicy};
use math::Vec4;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextConfig {
    pub warnings: WarningPolicy,
}

/// Explicit owner of the binding slots of one GL context.
///
/// The driver's binding points are global and mutable; this object mirrors them
/// so that every bind is paired with exactly one unbind of the same handle.
pub struct OpenGLContext<D: GraphicsDriver> {
    driver: Rc<D>,
    config: ContextConfig,
    pub vertex_array: VertexArrayState<D>,
    pub buffer: BufferState<D>,
    pub texture: TextureState<D>,
    pub program: ProgramState<D>,
}

impl<D: GraphicsDriver> OpenGLContext<D> {
    pub fn build_initialize(driver: D) -> Self {
        Self::with_config(driver, ContextConfig::default())
    }

    pub fn with_config(driver: D, config: ContextConfig) -> Self {
        let driver = Rc::new(driver);

        let vertex_array = VertexArrayState::build_initialized(driver.clone());
        let buffer = BufferState::build_initialized(driver.clone());
        let texture = TextureState::build_initialized(driver.clone());
        let program = ProgramState::build_initialized(driver.clone(), config.warnings);

        Self {
            driver,
            config,
            vertex_array,
            buffer,
            texture,
            program,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub(crate) fn raise(&self, warning: Warning) -> Warning {
        self.config.warnings.raise(warning)
    }

    pub fn is_unbound(&self) -> bool {
        self.vertex_array.slot().is_empty()
            && self.buffer.vertex_slot().is_empty()
            && self.buffer.index_slot().is_empty()
            && self.texture.slot().is_empty()
            && self.program.slot().is_empty()
    }

    pub fn assert_unbound(&self, when: &str) {
        let slots = [
            self.vertex_array.slot(),
            self.buffer.vertex_slot(),
            self.buffer.index_slot(),
            self.texture.slot(),
            self.program.slot(),
        ];

        for slot in slots.iter() {
            if let Some(handle) = slot.occupant() {
                panic!("{} slot still holds {} {}", slot.kind(), handle, when);
            }
        }
    }

    pub fn begin_frame(&mut self, clear: Vec4) {
        self.assert_unbound("at the start of a frame");

        self.driver.enable(gl::DEPTH_TEST);
        self.driver
            .clear(clear.to_array(), gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }

    pub fn end_frame(&mut self) {
        self.assert_unbound("at the end of a frame");
    }

    /// Describes attribute `index` as reading from the bound vertex buffer.
    ///
    /// Requires both a vertex array (which records the layout) and a vertex
    /// buffer (which supplies the data) to be bound.
    pub fn set_vertex_attribute<A: VertexAttribute>(&mut self, index: u32) -> &mut Self {
        self.vertex_array
            .slot()
            .expect_occupant("describing a vertex attribute");
        self.buffer
            .vertex_slot()
            .expect_occupant("describing a vertex attribute");

        self.driver
            .vertex_attrib_pointer(index, A::size(), A::type_(), A::normalized(), A::stride());

        self
    }
}

#[cfg(feature = "window")]
impl OpenGLContext<super::super::GlDriver> {
    pub fn from_window(
        window_context: &glutin::ContextWrapper<glutin::PossiblyCurrent, winit::window::Window>,
    ) -> Self {
        Self::build_initialize(super::super::GlDriver::from_window(window_context))
    }
}
