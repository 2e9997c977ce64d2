use super::gl;

/// The GL entry points the resource layer relies on.
///
/// GL keeps one implicit, global context per thread, so every call takes `&self`.
/// Handles are raw driver names; `0` is the null name.
pub trait GraphicsDriver {
    fn gen_vertex_array(&self) -> gl::GLuint;
    fn delete_vertex_array(&self, vao: gl::GLuint);
    fn bind_vertex_array(&self, vao: gl::GLuint);

    fn gen_buffer(&self) -> gl::GLuint;
    fn delete_buffer(&self, buffer: gl::GLuint);
    fn bind_buffer(&self, target: gl::GLenum, buffer: gl::GLuint);
    fn buffer_data(&self, target: gl::GLenum, data: &[u8], usage: gl::GLenum);

    fn enable_vertex_attrib_array(&self, index: gl::GLuint);
    fn disable_vertex_attrib_array(&self, index: gl::GLuint);
    fn vertex_attrib_pointer(
        &self,
        index: gl::GLuint,
        size: gl::GLint,
        type_: gl::GLenum,
        normalized: bool,
        stride: gl::GLsizei,
    );

    fn gen_texture(&self) -> gl::GLuint;
    fn delete_texture(&self, texture: gl::GLuint);
    fn bind_texture(&self, target: gl::GLenum, texture: gl::GLuint);
    fn tex_parameteri(&self, target: gl::GLenum, pname: gl::GLenum, param: gl::GLenum);
    fn tex_image_2d(
        &self,
        target: gl::GLenum,
        internal_format: gl::GLenum,
        width: u32,
        height: u32,
        format: gl::GLenum,
        type_: gl::GLenum,
        pixels: &[u8],
    );

    fn create_shader(&self, stage: gl::GLenum) -> gl::GLuint;
    fn shader_source(&self, shader: gl::GLuint, source: &str);
    /// Compiles and returns the info log on failure.
    fn compile_shader(&self, shader: gl::GLuint) -> Result<(), String>;
    fn delete_shader(&self, shader: gl::GLuint);

    fn create_program(&self) -> gl::GLuint;
    fn attach_shader(&self, program: gl::GLuint, shader: gl::GLuint);
    /// Links and returns the info log on failure.
    fn link_program(&self, program: gl::GLuint) -> Result<(), String>;
    fn delete_program(&self, program: gl::GLuint);
    fn use_program(&self, program: gl::GLuint);

    fn get_uniform_location(&self, program: gl::GLuint, name: &str) -> Option<gl::GLint>;
    fn uniform_1i(&self, location: gl::GLint, value: i32);
    fn uniform_1f(&self, location: gl::GLint, value: f32);
    fn uniform_2f(&self, location: gl::GLint, value: [f32; 2]);
    fn uniform_3f(&self, location: gl::GLint, value: [f32; 3]);
    fn uniform_4f(&self, location: gl::GLint, value: [f32; 4]);
    fn uniform_matrix_3f(&self, location: gl::GLint, value: &[f32; 9]);
    fn uniform_matrix_4f(&self, location: gl::GLint, value: &[f32; 16]);

    fn clear(&self, color: [f32; 4], mask: gl::GLbitfield);
    fn enable(&self, cap: gl::GLenum);

    fn draw_arrays(&self, mode: gl::GLenum, first: gl::GLint, count: gl::GLsizei);
    fn draw_elements(&self, mode: gl::GLenum, count: gl::GLsizei, index_type: gl::GLenum);
}

/// Driver backed by the generated OpenGL 3.3 core bindings.
///
/// Construct it only once a context is current on this thread.
#[derive(Debug)]
pub struct GlDriver {
    _private: (),
}

impl GlDriver {
    pub fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const std::os::raw::c_void,
    {
        gl::load_with(loader);
        Self { _private: () }
    }

    #[cfg(feature = "window")]
    pub fn from_window(
        window_context: &glutin::ContextWrapper<glutin::PossiblyCurrent, winit::window::Window>,
    ) -> Self {
        gl::init_from_window(window_context);
        Self { _private: () }
    }
}

impl GraphicsDriver for GlDriver {
    fn gen_vertex_array(&self) -> gl::GLuint {
        gl::gen_vertex_arrays(1)
    }

    fn delete_vertex_array(&self, vao: gl::GLuint) {
        gl::delete_vertex_arrays(vao);
    }

    fn bind_vertex_array(&self, vao: gl::GLuint) {
        gl::bind_vertex_array(vao);
    }

    fn gen_buffer(&self) -> gl::GLuint {
        gl::gen_buffers(1)
    }

    fn delete_buffer(&self, buffer: gl::GLuint) {
        gl::delete_buffers(buffer);
    }

    fn bind_buffer(&self, target: gl::GLenum, buffer: gl::GLuint) {
        gl::bind_buffer(target, buffer);
    }

    fn buffer_data(&self, target: gl::GLenum, data: &[u8], usage: gl::GLenum) {
        gl::buffer_data(target, data, usage);
    }

    fn enable_vertex_attrib_array(&self, index: gl::GLuint) {
        gl::enable_vertex_attrib_array(index);
    }

    fn disable_vertex_attrib_array(&self, index: gl::GLuint) {
        gl::disable_vertex_attrib_array(index);
    }

    fn vertex_attrib_pointer(
        &self,
        index: gl::GLuint,
        size: gl::GLint,
        type_: gl::GLenum,
        normalized: bool,
        stride: gl::GLsizei,
    ) {
        let normalized = if normalized { gl::TRUE } else { gl::FALSE };
        gl::vertex_attrib_pointer(index, size, type_, normalized, stride);
    }

    fn gen_texture(&self) -> gl::GLuint {
        gl::gen_textures(1)
    }

    fn delete_texture(&self, texture: gl::GLuint) {
        gl::delete_textures(texture);
    }

    fn bind_texture(&self, target: gl::GLenum, texture: gl::GLuint) {
        gl::bind_texture(target, texture);
    }

    fn tex_parameteri(&self, target: gl::GLenum, pname: gl::GLenum, param: gl::GLenum) {
        gl::tex_parameteri(target, pname, param);
    }

    fn tex_image_2d(
        &self,
        target: gl::GLenum,
        internal_format: gl::GLenum,
        width: u32,
        height: u32,
        format: gl::GLenum,
        type_: gl::GLenum,
        pixels: &[u8],
    ) {
        gl::tex_image_2d(target, 0, internal_format, width, height, format, type_, pixels);
    }

    fn create_shader(&self, stage: gl::GLenum) -> gl::GLuint {
        gl::create_shader(stage)
    }

    fn shader_source(&self, shader: gl::GLuint, source: &str) {
        gl::shader_source(shader, source);
    }

    fn compile_shader(&self, shader: gl::GLuint) -> Result<(), String> {
        gl::compile_shader(shader);

        if gl::get_shader_iv(shader, gl::COMPILE_STATUS) == gl::GLint::from(gl::TRUE) {
            Ok(())
        } else {
            let length = gl::get_shader_iv(shader, gl::INFO_LOG_LENGTH);
            Err(gl::get_shader_info_log(shader, length))
        }
    }

    fn delete_shader(&self, shader: gl::GLuint) {
        gl::delete_shader(shader);
    }

    fn create_program(&self) -> gl::GLuint {
        gl::create_program()
    }

    fn attach_shader(&self, program: gl::GLuint, shader: gl::GLuint) {
        gl::attach_shader(program, shader);
    }

    fn link_program(&self, program: gl::GLuint) -> Result<(), String> {
        gl::link_program(program);

        if gl::get_program_iv(program, gl::LINK_STATUS) == i32::from(gl::TRUE) {
            Ok(())
        } else {
            let length = gl::get_program_iv(program, gl::INFO_LOG_LENGTH);
            Err(gl::get_program_info_log(program, length))
        }
    }

    fn delete_program(&self, program: gl::GLuint) {
        gl::delete_program(program);
    }

    fn use_program(&self, program: gl::GLuint) {
        gl::use_program(program);
    }

    fn get_uniform_location(&self, program: gl::GLuint, name: &str) -> Option<gl::GLint> {
        match gl::get_uniform_location(program, name) {
            -1 => None,
            location => Some(location),
        }
    }

    fn uniform_1i(&self, location: gl::GLint, value: i32) {
        gl::uniform_1i(location, value);
    }

    fn uniform_1f(&self, location: gl::GLint, value: f32) {
        gl::uniform_1f(location, value);
    }

    fn uniform_2f(&self, location: gl::GLint, value: [f32; 2]) {
        gl::uniform_2f(location, value);
    }

    fn uniform_3f(&self, location: gl::GLint, value: [f32; 3]) {
        gl::uniform_3f(location, value);
    }

    fn uniform_4f(&self, location: gl::GLint, value: [f32; 4]) {
        gl::uniform_4f(location, value);
    }

    fn uniform_matrix_3f(&self, location: gl::GLint, value: &[f32; 9]) {
        gl::uniform_matrix_3f(location, value);
    }

    fn uniform_matrix_4f(&self, location: gl::GLint, value: &[f32; 16]) {
        gl::uniform_matrix_4f(location, value);
    }

    fn clear(&self, color: [f32; 4], mask: gl::GLbitfield) {
        gl::clear_color(color[0], color[1], color[2], color[3]);
        gl::clear(mask);
    }

    fn enable(&self, cap: gl::GLenum) {
        gl::enable(cap);
    }

    fn draw_arrays(&self, mode: gl::GLenum, first: gl::GLint, count: gl::GLsizei) {
        gl::draw_arrays(mode, first, count);
    }

    fn draw_elements(&self, mode: gl::GLenum, count: gl::GLsizei, index_type: gl::GLenum) {
        gl::draw_elements(mode, count, index_type);
    }
}
