use std::ffi::CString;
use std::os::raw::c_void;

mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

pub use self::gl::types::*;
pub use self::gl::*;

#[cfg(feature = "window")]
use glutin::{ContextWrapper, PossiblyCurrent};
#[cfg(feature = "window")]
use winit::window::Window;

#[cfg(feature = "window")]
#[inline]
pub fn init_from_window(window_context: &ContextWrapper<PossiblyCurrent, Window>) {
    load_with(|ptr| window_context.context().get_proc_address(ptr) as *const _);
}

#[inline]
fn c_name(name: &str) -> CString {
    CString::new(name).unwrap_or_default()
}

#[inline]
pub fn get_program_iv(program: GLuint, pname: GLenum) -> GLint {
    unsafe {
        let mut params: GLint = 0;
        GetProgramiv(program, pname, &mut params);
        params
    }
}

#[inline]
pub fn get_shader_iv(shader: GLuint, pname: GLenum) -> GLint {
    unsafe {
        let mut params: GLint = 0;
        GetShaderiv(shader, pname, &mut params);
        params
    }
}

#[inline]
pub fn get_shader_info_log(shader: GLuint, buf_size: GLsizei) -> String {
    unsafe {
        let mut actual_length: GLint = 0;
        let mut buf: Vec<u8> = Vec::with_capacity(buf_size.max(0) as usize);

        GetShaderInfoLog(
            shader,
            buf_size,
            &mut actual_length,
            buf.as_mut_ptr() as *mut _,
        );

        buf.set_len(actual_length.max(0) as usize);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[inline]
pub fn get_program_info_log(program: GLuint, buf_size: GLsizei) -> String {
    unsafe {
        let mut actual_length: GLint = 0;
        let mut buf: Vec<u8> = Vec::with_capacity(buf_size.max(0) as usize);

        GetProgramInfoLog(
            program,
            buf_size,
            &mut actual_length,
            buf.as_mut_ptr() as *mut _,
        );

        buf.set_len(actual_length.max(0) as usize);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[inline]
pub fn attach_shader(program: GLuint, shader: GLuint) {
    unsafe {
        AttachShader(program, shader);
    }
}

#[inline]
pub fn link_program(program: GLuint) {
    unsafe {
        LinkProgram(program);
    }
}

#[inline]
pub fn compile_shader(shader: GLuint) {
    unsafe {
        CompileShader(shader);
    }
}

#[inline]
pub fn create_shader(xtype: GLenum) -> GLuint {
    unsafe { CreateShader(xtype) }
}

#[inline]
pub fn create_program() -> GLuint {
    unsafe { CreateProgram() }
}

#[inline]
pub fn shader_source(shader: GLuint, string: &str) {
    unsafe {
        let len: [GLint; 1] = [string.len() as GLint];

        ShaderSource(shader, 1, &(string.as_ptr() as *const _), len.as_ptr());
    }
}

#[inline]
pub fn delete_shader(shader: GLuint) {
    unsafe {
        DeleteShader(shader);
    }
}

#[inline]
pub fn delete_program(program: GLuint) {
    unsafe {
        DeleteProgram(program);
    }
}

#[inline]
pub fn buffer_data(target: GLenum, data: &[u8], usage: GLenum) {
    unsafe {
        BufferData(
            target,
            data.len() as GLsizeiptr,
            data.as_ptr() as *const _,
            usage,
        );
    }
}

#[inline]
pub fn enable_vertex_attrib_array(index: GLuint) {
    unsafe {
        EnableVertexAttribArray(index);
    }
}

#[inline]
pub fn disable_vertex_attrib_array(index: GLuint) {
    unsafe {
        DisableVertexAttribArray(index);
    }
}

#[inline]
pub fn vertex_attrib_pointer(
    index: GLuint,
    size: GLint,
    type_: GLenum,
    normalized: GLboolean,
    stride: GLsizei,
) {
    // Non-interleaved layout: every attribute starts at offset zero of its own buffer.
    unsafe { VertexAttribPointer(index, size, type_, normalized, stride, std::ptr::null()) }
}

#[inline]
pub fn gen_vertex_arrays(count: i32) -> GLuint {
    unsafe {
        let mut vao = 0;
        GenVertexArrays(count, &mut vao);
        vao
    }
}

#[inline]
pub fn delete_vertex_arrays(vao: GLuint) {
    unsafe {
        DeleteVertexArrays(1, &vao);
    }
}

#[inline]
pub fn gen_buffers(count: i32) -> GLuint {
    unsafe {
        let mut vbo = 0;
        GenBuffers(count, &mut vbo);
        vbo
    }
}

#[inline]
pub fn delete_buffers(buffer: GLuint) {
    unsafe {
        DeleteBuffers(1, &buffer);
    }
}

#[inline]
pub fn bind_buffer(target: GLenum, buffer: GLuint) {
    unsafe {
        BindBuffer(target, buffer);
    }
}

#[inline]
pub fn bind_vertex_array(array: GLuint) {
    unsafe {
        BindVertexArray(array);
    }
}

#[inline]
pub fn use_program(program: GLuint) {
    unsafe {
        UseProgram(program);
    }
}

#[inline]
pub fn get_uniform_location(program: GLuint, name: &str) -> GLint {
    let name = c_name(name);
    unsafe { GetUniformLocation(program, name.as_ptr()) }
}

#[inline]
pub fn uniform_matrix_3f(location: GLint, value: &[f32; 9]) {
    unsafe {
        UniformMatrix3fv(location, 1, FALSE, value.as_ptr());
    }
}

#[inline]
pub fn uniform_matrix_4f(location: GLint, value: &[f32; 16]) {
    unsafe {
        UniformMatrix4fv(location, 1, FALSE, value.as_ptr());
    }
}

#[inline]
pub fn uniform_1i(location: GLint, value: GLint) {
    unsafe {
        Uniform1i(location, value);
    }
}

#[inline]
pub fn uniform_1f(location: GLint, value: GLfloat) {
    unsafe {
        Uniform1f(location, value);
    }
}

#[inline]
pub fn uniform_2f(location: GLint, value: [f32; 2]) {
    unsafe {
        Uniform2f(location, value[0], value[1]);
    }
}

#[inline]
pub fn uniform_3f(location: GLint, value: [f32; 3]) {
    unsafe {
        Uniform3f(location, value[0], value[1], value[2]);
    }
}

#[inline]
pub fn uniform_4f(location: GLint, value: [f32; 4]) {
    unsafe {
        Uniform4f(location, value[0], value[1], value[2], value[3]);
    }
}

#[inline]
pub fn clear_color(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat) {
    unsafe {
        ClearColor(red, green, blue, alpha);
    }
}

#[inline]
pub fn clear(mask: GLbitfield) {
    unsafe {
        Clear(mask);
    }
}

#[inline]
pub fn enable(cap: GLenum) {
    unsafe {
        Enable(cap);
    }
}

#[inline]
pub fn draw_arrays(mode: GLenum, first: GLint, count: GLsizei) {
    unsafe {
        DrawArrays(mode, first, count);
    }
}

#[inline]
pub fn draw_elements(mode: GLenum, count: GLsizei, type_: GLenum) {
    unsafe {
        DrawElements(mode, count, type_, std::ptr::null());
    }
}

#[inline]
pub fn gen_textures(count: GLint) -> GLuint {
    unsafe {
        let mut texture = 0;
        GenTextures(count, &mut texture);
        texture
    }
}

#[inline]
pub fn delete_textures(texture: GLuint) {
    unsafe {
        DeleteTextures(1, &texture);
    }
}

#[inline]
pub fn bind_texture(target: GLenum, texture: GLuint) {
    unsafe {
        BindTexture(target, texture);
    }
}

#[inline]
pub fn tex_parameteri(target: GLenum, pname: GLenum, param: GLenum) {
    unsafe {
        TexParameteri(target, pname, param as i32);
    }
}

#[inline]
pub fn tex_image_2d(
    target: GLenum,
    level: GLint,
    internal_format: GLenum,
    width: u32,
    height: u32,
    format: GLenum,
    type_: GLenum,
    pixels: &[u8],
) {
    unsafe {
        TexImage2D(
            target,
            level,
            internal_format as i32,
            width as i32,
            height as i32,
            0,
            format,
            type_,
            pixels.as_ptr() as *const c_void,
        );
    }
}
