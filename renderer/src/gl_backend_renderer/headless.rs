//! A driver that runs without a GPU.
//!
//! It keeps just enough GL state to validate call sequences: live object names,
//! buffer and texture storage, per-vertex-array attribute layout and element
//! buffer, uniform declarations of linked programs. Draw calls perform vertex
//! fetch on the CPU so tests can inspect exactly what would be rasterised.
//! Anything real GL would reject with an error panics here.

use super::{gl, Attribute, GraphicsDriver};
use lazy_static::lazy_static;
use math::{Vec2, Vec3};
use regex::Regex;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

lazy_static! {
    static ref EXTRACT_UNIFORMS: Regex = Regex::new(r"uniform\s+\w+\s+(\w+)\s*;").unwrap();
    static ref EXTRACT_ERRORS: Regex = Regex::new(r"#error\s+(.*)").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    BindVertexArray(u32),
    BindBuffer { target: gl::GLenum, buffer: u32 },
    BufferData { target: gl::GLenum, buffer: u32, bytes: usize },
    EnableAttribute(u32),
    DisableAttribute(u32),
    AttributePointer { index: u32, buffer: u32, size: i32, stride: i32 },
    BindTexture(u32),
    TexParameter { pname: gl::GLenum, param: gl::GLenum },
    TexImage { texture: u32, width: u32, height: u32 },
    UseProgram(u32),
    Clear,
    DrawArrays { first: i32, count: i32 },
    DrawElements { count: i32, index_type: gl::GLenum },
    Delete(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniformWrite {
    pub program: u32,
    pub name: String,
    pub value: UniformValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeLayout {
    pub enabled: bool,
    pub buffer: u32,
    pub size: i32,
    pub type_: gl::GLenum,
    pub stride: i32,
}

/// One vertex as the vertex shader would receive it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Corner {
    pub position: Option<Vec3>,
    pub tcoord: Option<Vec2>,
    pub normal: Option<Vec3>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub vertex_array: u32,
    pub program: u32,
    pub texture: u32,
    pub indexed: bool,
    pub corners: Vec<Corner>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureRecord {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub parameters: BTreeMap<gl::GLenum, gl::GLenum>,
}

#[derive(Debug, Default)]
struct VertexArrayRecord {
    element_buffer: u32,
    attributes: BTreeMap<u32, AttributeLayout>,
}

#[derive(Debug)]
struct ShaderRecord {
    stage: gl::GLenum,
    source: String,
    compiled: bool,
}

#[derive(Debug, Default)]
struct ProgramRecord {
    attached: Vec<u32>,
    uniforms: Vec<String>,
    linked: bool,
}

#[derive(Debug, Default)]
struct HeadlessState {
    next_name: u32,
    vertex_arrays: HashMap<u32, VertexArrayRecord>,
    buffers: HashMap<u32, Vec<u8>>,
    textures: HashMap<u32, TextureRecord>,
    shaders: HashMap<u32, ShaderRecord>,
    programs: HashMap<u32, ProgramRecord>,

    bound_vertex_array: u32,
    bound_array_buffer: u32,
    bound_element_buffer: u32,
    bound_texture: u32,
    bound_program: u32,

    calls: Vec<DriverCall>,
    draws: Vec<DrawRecord>,
    uniform_writes: Vec<UniformWrite>,
}

impl HeadlessState {
    fn gen_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    fn bound_vao_mut(&mut self, what: &str) -> &mut VertexArrayRecord {
        let vao = self.bound_vertex_array;
        assert!(vao != 0, "{} without a bound vertex array", what);
        self.vertex_arrays
            .get_mut(&vao)
            .unwrap_or_else(|| panic!("vertex array {} was deleted while bound", vao))
    }

    fn element_buffer(&self) -> u32 {
        match self.vertex_arrays.get(&self.bound_vertex_array) {
            Some(vao) => vao.element_buffer,
            None => self.bound_element_buffer,
        }
    }

    fn buffer_for(&self, target: gl::GLenum) -> u32 {
        match target {
            gl::ARRAY_BUFFER => self.bound_array_buffer,
            gl::ELEMENT_ARRAY_BUFFER => self.element_buffer(),
            other => panic!("unsupported buffer target {:#x}", other),
        }
    }

    fn read_floats(&self, layout: &AttributeLayout, vertex: usize) -> Vec<f32> {
        let bytes = &self.buffers[&layout.buffer];
        let start = vertex * layout.stride as usize;
        let end = start + layout.size as usize * 4;
        assert!(
            end <= bytes.len(),
            "vertex fetch of vertex {} reads past the end of buffer {}",
            vertex,
            layout.buffer
        );

        bytemuck::pod_collect_to_vec::<u8, f32>(&bytes[start..end])
    }

    fn fetch(&self, vertex: usize) -> Corner {
        let vao = &self.vertex_arrays[&self.bound_vertex_array];
        let mut corner = Corner::default();

        for (index, layout) in vao.attributes.iter().filter(|(_, l)| l.enabled) {
            assert!(
                layout.buffer != 0,
                "attribute {} is enabled but was never described",
                index
            );
            let v = self.read_floats(layout, vertex);

            if *index == Attribute::Position.location() && v.len() == 3 {
                corner.position = Some(Vec3::from_components(v[0], v[1], v[2]));
            } else if *index == Attribute::TexCoord.location() && v.len() == 2 {
                corner.tcoord = Some(Vec2::from_components(v[0], v[1]));
            } else if *index == Attribute::Normal.location() && v.len() == 3 {
                corner.normal = Some(Vec3::from_components(v[0], v[1], v[2]));
            }
        }

        corner
    }

    fn record_draw(&mut self, indexed: bool, vertices: Vec<usize>) {
        let corners = vertices.into_iter().map(|v| self.fetch(v)).collect();

        self.draws.push(DrawRecord {
            vertex_array: self.bound_vertex_array,
            program: self.bound_program,
            texture: self.bound_texture,
            indexed,
            corners,
        });
    }

    fn write_uniform(&mut self, location: gl::GLint, value: UniformValue) {
        let program = self.bound_program;
        assert!(program != 0, "uniform upload without a program in use");

        let record = &self.programs[&program];
        let name = record
            .uniforms
            .get(location as usize)
            .unwrap_or_else(|| panic!("location {} is not a uniform of program {}", location, program))
            .clone();

        self.uniform_writes.push(UniformWrite {
            program,
            name,
            value,
        });
    }
}

/// Records and validates GL calls without touching a GPU.
#[derive(Debug, Default)]
pub struct HeadlessDriver {
    state: RefCell<HeadlessState>,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.state.borrow().calls.clone()
    }

    pub fn draws(&self) -> Vec<DrawRecord> {
        self.state.borrow().draws.clone()
    }

    pub fn last_draw(&self) -> Option<DrawRecord> {
        self.state.borrow().draws.last().cloned()
    }

    pub fn uniform_writes(&self) -> Vec<UniformWrite> {
        self.state.borrow().uniform_writes.clone()
    }

    pub fn buffer_contents(&self, buffer: u32) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    pub fn texture(&self, texture: u32) -> Option<TextureRecord> {
        self.state.borrow().textures.get(&texture).cloned()
    }

    pub fn attribute_layout(&self, vertex_array: u32, index: u32) -> Option<AttributeLayout> {
        let state = self.state.borrow();
        state
            .vertex_arrays
            .get(&vertex_array)
            .and_then(|vao| vao.attributes.get(&index).copied())
    }

    pub fn element_buffer_of(&self, vertex_array: u32) -> Option<u32> {
        let state = self.state.borrow();
        state
            .vertex_arrays
            .get(&vertex_array)
            .map(|vao| vao.element_buffer)
            .filter(|buffer| *buffer != 0)
    }

    /// Number of objects allocated and not yet deleted.
    pub fn live_objects(&self) -> usize {
        let state = self.state.borrow();
        state.vertex_arrays.len()
            + state.buffers.len()
            + state.textures.len()
            + state.shaders.len()
            + state.programs.len()
    }

    fn call(&self, call: DriverCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn delete<T>(map: &mut HashMap<u32, T>, name: u32, what: &str) {
        assert!(
            map.remove(&name).is_some(),
            "deleting {} {} which is not alive",
            what,
            name
        );
    }
}

impl GraphicsDriver for HeadlessDriver {
    fn gen_vertex_array(&self) -> gl::GLuint {
        let mut state = self.state.borrow_mut();
        let name = state.gen_name();
        state.vertex_arrays.insert(name, VertexArrayRecord::default());
        name
    }

    fn delete_vertex_array(&self, vao: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        Self::delete(&mut state.vertex_arrays, vao, "vertex array");
        state.calls.push(DriverCall::Delete(vao));
    }

    fn bind_vertex_array(&self, vao: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        assert!(
            vao == 0 || state.vertex_arrays.contains_key(&vao),
            "binding unknown vertex array {}",
            vao
        );
        state.bound_vertex_array = vao;
        state.calls.push(DriverCall::BindVertexArray(vao));
    }

    fn gen_buffer(&self) -> gl::GLuint {
        let mut state = self.state.borrow_mut();
        let name = state.gen_name();
        state.buffers.insert(name, Vec::new());
        name
    }

    fn delete_buffer(&self, buffer: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        Self::delete(&mut state.buffers, buffer, "buffer");
        state.calls.push(DriverCall::Delete(buffer));
    }

    fn bind_buffer(&self, target: gl::GLenum, buffer: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        assert!(
            buffer == 0 || state.buffers.contains_key(&buffer),
            "binding unknown buffer {}",
            buffer
        );

        match target {
            gl::ARRAY_BUFFER => state.bound_array_buffer = buffer,
            gl::ELEMENT_ARRAY_BUFFER => {
                // The element binding is vertex array state.
                let vao = state.bound_vertex_array;
                match state.vertex_arrays.get_mut(&vao) {
                    Some(record) => record.element_buffer = buffer,
                    None => state.bound_element_buffer = buffer,
                }
            }
            other => panic!("unsupported buffer target {:#x}", other),
        }

        state.calls.push(DriverCall::BindBuffer { target, buffer });
    }

    fn buffer_data(&self, target: gl::GLenum, data: &[u8], usage: gl::GLenum) {
        let mut state = self.state.borrow_mut();
        assert_eq!(usage, gl::STATIC_DRAW, "only static uploads are expected");

        let buffer = state.buffer_for(target);
        assert!(buffer != 0, "buffer upload with nothing bound to {:#x}", target);

        state.buffers.insert(buffer, data.to_vec());
        state.calls.push(DriverCall::BufferData {
            target,
            buffer,
            bytes: data.len(),
        });
    }

    fn enable_vertex_attrib_array(&self, index: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        state
            .bound_vao_mut("enabling an attribute")
            .attributes
            .entry(index)
            .or_insert(AttributeLayout {
                enabled: false,
                buffer: 0,
                size: 0,
                type_: 0,
                stride: 0,
            })
            .enabled = true;
        state.calls.push(DriverCall::EnableAttribute(index));
    }

    fn disable_vertex_attrib_array(&self, index: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        if let Some(layout) = state
            .bound_vao_mut("disabling an attribute")
            .attributes
            .get_mut(&index)
        {
            layout.enabled = false;
        }
        state.calls.push(DriverCall::DisableAttribute(index));
    }

    fn vertex_attrib_pointer(
        &self,
        index: gl::GLuint,
        size: gl::GLint,
        type_: gl::GLenum,
        _normalized: bool,
        stride: gl::GLsizei,
    ) {
        let mut state = self.state.borrow_mut();
        let buffer = state.bound_array_buffer;
        assert!(buffer != 0, "attribute {} described without a vertex buffer", index);
        assert_eq!(type_, gl::FLOAT, "only float attributes are fetched");

        let layout = state
            .bound_vao_mut("describing an attribute")
            .attributes
            .entry(index)
            .or_insert(AttributeLayout {
                enabled: false,
                buffer,
                size,
                type_,
                stride,
            });
        layout.buffer = buffer;
        layout.size = size;
        layout.type_ = type_;
        layout.stride = stride;

        state.calls.push(DriverCall::AttributePointer {
            index,
            buffer,
            size,
            stride,
        });
    }

    fn gen_texture(&self) -> gl::GLuint {
        let mut state = self.state.borrow_mut();
        let name = state.gen_name();
        state.textures.insert(
            name,
            TextureRecord {
                width: 0,
                height: 0,
                pixels: Vec::new(),
                parameters: BTreeMap::new(),
            },
        );
        name
    }

    fn delete_texture(&self, texture: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        Self::delete(&mut state.textures, texture, "texture");
        state.calls.push(DriverCall::Delete(texture));
    }

    fn bind_texture(&self, target: gl::GLenum, texture: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        assert_eq!(target, gl::TEXTURE_2D);
        assert!(
            texture == 0 || state.textures.contains_key(&texture),
            "binding unknown texture {}",
            texture
        );
        state.bound_texture = texture;
        state.calls.push(DriverCall::BindTexture(texture));
    }

    fn tex_parameteri(&self, _target: gl::GLenum, pname: gl::GLenum, param: gl::GLenum) {
        let mut state = self.state.borrow_mut();
        let texture = state.bound_texture;
        state
            .textures
            .get_mut(&texture)
            .unwrap_or_else(|| panic!("texture parameter without a bound texture"))
            .parameters
            .insert(pname, param);
        state.calls.push(DriverCall::TexParameter { pname, param });
    }

    fn tex_image_2d(
        &self,
        _target: gl::GLenum,
        _internal_format: gl::GLenum,
        width: u32,
        height: u32,
        format: gl::GLenum,
        type_: gl::GLenum,
        pixels: &[u8],
    ) {
        let mut state = self.state.borrow_mut();
        assert_eq!((format, type_), (gl::RGBA, gl::UNSIGNED_BYTE));

        let texture = state.bound_texture;
        let record = state
            .textures
            .get_mut(&texture)
            .unwrap_or_else(|| panic!("texture upload without a bound texture"));
        record.width = width;
        record.height = height;
        record.pixels = pixels.to_vec();

        state.calls.push(DriverCall::TexImage {
            texture,
            width,
            height,
        });
    }

    fn create_shader(&self, stage: gl::GLenum) -> gl::GLuint {
        let mut state = self.state.borrow_mut();
        let name = state.gen_name();
        state.shaders.insert(
            name,
            ShaderRecord {
                stage,
                source: String::new(),
                compiled: false,
            },
        );
        name
    }

    fn shader_source(&self, shader: gl::GLuint, source: &str) {
        let mut state = self.state.borrow_mut();
        let record = state
            .shaders
            .get_mut(&shader)
            .unwrap_or_else(|| panic!("source for unknown shader {}", shader));
        record.source = source.to_string();
    }

    fn compile_shader(&self, shader: gl::GLuint) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        let record = state
            .shaders
            .get_mut(&shader)
            .unwrap_or_else(|| panic!("compiling unknown shader {}", shader));

        if !record.source.trim_start().starts_with("#version") {
            return Err("0:1: error: #version directive must come first".to_string());
        }
        if let Some(capture) = EXTRACT_ERRORS.captures(&record.source) {
            return Err(format!("0:1: error: {}", capture[1].trim()));
        }

        record.compiled = true;
        Ok(())
    }

    fn delete_shader(&self, shader: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        Self::delete(&mut state.shaders, shader, "shader");
        state.calls.push(DriverCall::Delete(shader));
    }

    fn create_program(&self) -> gl::GLuint {
        let mut state = self.state.borrow_mut();
        let name = state.gen_name();
        state.programs.insert(name, ProgramRecord::default());
        name
    }

    fn attach_shader(&self, program: gl::GLuint, shader: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        assert!(
            state.shaders.contains_key(&shader),
            "attaching unknown shader {}",
            shader
        );
        state
            .programs
            .get_mut(&program)
            .unwrap_or_else(|| panic!("attaching to unknown program {}", program))
            .attached
            .push(shader);
    }

    fn link_program(&self, program: gl::GLuint) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        let attached = state
            .programs
            .get(&program)
            .unwrap_or_else(|| panic!("linking unknown program {}", program))
            .attached
            .clone();

        let mut uniforms: Vec<String> = Vec::new();
        for stage in [gl::VERTEX_SHADER, gl::FRAGMENT_SHADER].iter() {
            let shader = attached
                .iter()
                .filter_map(|name| state.shaders.get(name))
                .find(|shader| shader.stage == *stage && shader.compiled);

            let shader = match shader {
                Some(shader) => shader,
                None => return Err(format!("no compiled shader for stage {:#x}", stage)),
            };

            for capture in EXTRACT_UNIFORMS.captures_iter(&shader.source) {
                if !uniforms.iter().any(|name| name == &capture[1]) {
                    uniforms.push(capture[1].to_string());
                }
            }
        }

        if let Some(record) = state.programs.get_mut(&program) {
            record.uniforms = uniforms;
            record.linked = true;
        }
        Ok(())
    }

    fn delete_program(&self, program: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        Self::delete(&mut state.programs, program, "program");
        state.calls.push(DriverCall::Delete(program));
    }

    fn use_program(&self, program: gl::GLuint) {
        let mut state = self.state.borrow_mut();
        assert!(
            program == 0 || state.programs.get(&program).map_or(false, |p| p.linked),
            "using program {} which is not linked",
            program
        );
        state.bound_program = program;
        state.calls.push(DriverCall::UseProgram(program));
    }

    fn get_uniform_location(&self, program: gl::GLuint, name: &str) -> Option<gl::GLint> {
        let state = self.state.borrow();
        let record = state
            .programs
            .get(&program)
            .unwrap_or_else(|| panic!("uniform lookup on unknown program {}", program));

        record
            .uniforms
            .iter()
            .position(|uniform| uniform == name)
            .map(|location| location as gl::GLint)
    }

    fn uniform_1i(&self, location: gl::GLint, value: i32) {
        self.state
            .borrow_mut()
            .write_uniform(location, UniformValue::Int(value));
    }

    fn uniform_1f(&self, location: gl::GLint, value: f32) {
        self.state
            .borrow_mut()
            .write_uniform(location, UniformValue::Float(value));
    }

    fn uniform_2f(&self, location: gl::GLint, value: [f32; 2]) {
        self.state
            .borrow_mut()
            .write_uniform(location, UniformValue::Vec2(value));
    }

    fn uniform_3f(&self, location: gl::GLint, value: [f32; 3]) {
        self.state
            .borrow_mut()
            .write_uniform(location, UniformValue::Vec3(value));
    }

    fn uniform_4f(&self, location: gl::GLint, value: [f32; 4]) {
        self.state
            .borrow_mut()
            .write_uniform(location, UniformValue::Vec4(value));
    }

    fn uniform_matrix_3f(&self, location: gl::GLint, value: &[f32; 9]) {
        self.state
            .borrow_mut()
            .write_uniform(location, UniformValue::Mat3(*value));
    }

    fn uniform_matrix_4f(&self, location: gl::GLint, value: &[f32; 16]) {
        self.state
            .borrow_mut()
            .write_uniform(location, UniformValue::Mat4(*value));
    }

    fn clear(&self, _color: [f32; 4], _mask: gl::GLbitfield) {
        self.call(DriverCall::Clear);
    }

    fn enable(&self, _cap: gl::GLenum) {}

    fn draw_arrays(&self, mode: gl::GLenum, first: gl::GLint, count: gl::GLsizei) {
        let mut state = self.state.borrow_mut();
        assert_eq!(mode, gl::TRIANGLES);
        state.bound_vao_mut("drawing");

        let vertices = (first as usize..(first + count) as usize).collect();
        state.record_draw(false, vertices);
        state.calls.push(DriverCall::DrawArrays { first, count });
    }

    fn draw_elements(&self, mode: gl::GLenum, count: gl::GLsizei, index_type: gl::GLenum) {
        let mut state = self.state.borrow_mut();
        assert_eq!(mode, gl::TRIANGLES);
        assert_eq!(index_type, gl::UNSIGNED_SHORT, "indices are 16-bit");
        state.bound_vao_mut("drawing");

        let element_buffer = state.element_buffer();
        assert!(element_buffer != 0, "indexed draw without an element buffer");

        let indices: Vec<u16> = bytemuck::pod_collect_to_vec(state.buffers[&element_buffer].as_slice());
        assert!(
            count as usize <= indices.len(),
            "indexed draw of {} reads past {} indices",
            count,
            indices.len()
        );

        let vertices = indices[..count as usize]
            .iter()
            .map(|index| *index as usize)
            .collect();
        state.record_draw(true, vertices);
        state.calls.push(DriverCall::DrawElements { count, index_type });
    }
}
