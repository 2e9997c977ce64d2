use super::super::{gl, GraphicsDriver};
use super::{BindingSlot, GpuHandle, SlotKind};
use crate::{Diagnosed, Warning, WarningPolicy};
use math::{Mat4, Vec2, Vec3, Vec4};
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> gl::GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    /// File extension every source for this stage must carry.
    pub fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::Fragment => "frag",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct GLShader(pub GpuHandle);

#[derive(Debug, Default, PartialEq)]
pub struct GLProgram(pub GpuHandle);

impl GLShader {
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl GLProgram {
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

/// Values that can be written to a uniform location.
pub trait Uniform {
    fn upload<D: GraphicsDriver>(&self, driver: &D, location: gl::GLint);
}

impl Uniform for i32 {
    fn upload<D: GraphicsDriver>(&self, driver: &D, location: gl::GLint) {
        driver.uniform_1i(location, *self);
    }
}

impl Uniform for f32 {
    fn upload<D: GraphicsDriver>(&self, driver: &D, location: gl::GLint) {
        driver.uniform_1f(location, *self);
    }
}

impl Uniform for Vec2 {
    fn upload<D: GraphicsDriver>(&self, driver: &D, location: gl::GLint) {
        driver.uniform_2f(location, self.to_array());
    }
}

impl Uniform for Vec3 {
    fn upload<D: GraphicsDriver>(&self, driver: &D, location: gl::GLint) {
        driver.uniform_3f(location, self.to_array());
    }
}

impl Uniform for Vec4 {
    fn upload<D: GraphicsDriver>(&self, driver: &D, location: gl::GLint) {
        driver.uniform_4f(location, self.to_array());
    }
}

impl Uniform for Mat4 {
    fn upload<D: GraphicsDriver>(&self, driver: &D, location: gl::GLint) {
        driver.uniform_matrix_4f(location, &self.elements);
    }
}

/// Sends the rotation/scale block of a 4x4 matrix as a `mat3`.
#[derive(Debug, Clone, Copy)]
pub struct Mat3From(pub Mat4);

impl Uniform for Mat3From {
    fn upload<D: GraphicsDriver>(&self, driver: &D, location: gl::GLint) {
        driver.uniform_matrix_3f(location, &self.0.to_mat3_elements());
    }
}

pub struct ProgramState<D: GraphicsDriver> {
    driver: Rc<D>,
    slot: BindingSlot,
    policy: WarningPolicy,
}

impl<D: GraphicsDriver> ProgramState<D> {
    pub fn build_initialized(driver: Rc<D>, policy: WarningPolicy) -> Self {
        Self {
            driver,
            slot: BindingSlot::new(SlotKind::Program),
            policy,
        }
    }

    pub fn slot(&self) -> &BindingSlot {
        &self.slot
    }

    /// Reads, validates and compiles one stage.
    ///
    /// A missing file or a compile error yields a null shader plus a warning.
    /// A source whose extension does not match `stage` is a programming error.
    pub fn create_shader<P: AsRef<Path>>(&self, stage: ShaderStage, path: P) -> Diagnosed<GLShader> {
        let path = path.as_ref();

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                let warning = self.policy.raise(Warning::ShaderNotFound {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
                return Diagnosed::with_warnings(GLShader::default(), vec![warning]);
            }
        };

        let extension = path.extension().and_then(|ext| ext.to_str());
        assert_eq!(
            extension,
            Some(stage.extension()),
            "{} shader {} must have the .{} extension",
            stage,
            path.display(),
            stage.extension()
        );

        self.compile(stage, &source)
    }

    pub fn create_shader_from_source(&self, stage: ShaderStage, source: &str) -> Diagnosed<GLShader> {
        self.compile(stage, source)
    }

    fn compile(&self, stage: ShaderStage, source: &str) -> Diagnosed<GLShader> {
        let shader = self.driver.create_shader(stage.gl_enum());
        self.driver.shader_source(shader, source);

        match self.driver.compile_shader(shader) {
            Ok(()) => {
                log::debug!("compiled {} shader {}", stage, shader);
                Diagnosed::clean(GLShader(GpuHandle::from_raw(shader)))
            }
            Err(log) => {
                self.driver.delete_shader(shader);
                let warning = self.policy.raise(Warning::ShaderCompile { stage, log });
                Diagnosed::with_warnings(GLShader::default(), vec![warning])
            }
        }
    }

    pub fn destroy_shader(&self, shader: &mut GLShader) {
        assert!(!shader.is_null(), "cannot destroy a null shader");

        self.driver.delete_shader(shader.0.raw());
        shader.0 = GpuHandle::NULL;
    }

    pub fn create_program(&self, vertex: &GLShader, fragment: &GLShader) -> Diagnosed<GLProgram> {
        let missing = [(vertex, ShaderStage::Vertex), (fragment, ShaderStage::Fragment)]
            .iter()
            .find(|(shader, _)| shader.is_null())
            .map(|(_, stage)| *stage);

        if let Some(stage) = missing {
            let warning = self.policy.raise(Warning::ProgramLink {
                log: format!("{} stage is missing", stage),
            });
            return Diagnosed::with_warnings(GLProgram::default(), vec![warning]);
        }

        let program = self.driver.create_program();
        self.driver.attach_shader(program, vertex.0.raw());
        self.driver.attach_shader(program, fragment.0.raw());

        match self.driver.link_program(program) {
            Ok(()) => {
                log::debug!("linked program {}", program);
                Diagnosed::clean(GLProgram(GpuHandle::from_raw(program)))
            }
            Err(log) => {
                self.driver.delete_program(program);
                let warning = self.policy.raise(Warning::ProgramLink { log });
                Diagnosed::with_warnings(GLProgram::default(), vec![warning])
            }
        }
    }

    pub fn destroy_program(&self, program: &mut GLProgram) {
        assert!(!program.is_null(), "cannot destroy a null program");
        assert!(
            self.slot.occupant() != Some(program.0),
            "program {} is still bound",
            program.0
        );

        self.driver.delete_program(program.0.raw());
        program.0 = GpuHandle::NULL;
    }

    pub fn bind(&mut self, program: &GLProgram) -> &mut Self {
        self.slot.occupy(program.0);
        self.driver.use_program(program.0.raw());

        self
    }

    pub fn unbind(&mut self, program: &GLProgram) {
        self.slot.release(program.0);
        self.driver.use_program(0);
    }

    /// Writes `value` to the uniform `name` of the bound program.
    ///
    /// Shaders may legitimately ignore uniforms a caller sends, so an unknown
    /// name is a warning and nothing is uploaded.
    pub fn send<T: Uniform>(&self, value: &T, name: &str) -> Diagnosed<bool> {
        let program = self.slot.expect_occupant("sending a uniform");

        match self.driver.get_uniform_location(program.raw(), name) {
            Some(location) => {
                value.upload(&*self.driver, location);
                Diagnosed::clean(true)
            }
            None => {
                let warning = self.policy.raise(Warning::UniformNotFound {
                    program: program.raw(),
                    name: name.to_string(),
                });
                Diagnosed::with_warnings(false, vec![warning])
            }
        }
    }

    pub fn send_int(&self, value: i32, name: &str) -> Diagnosed<bool> {
        self.send(&value, name)
    }

    pub fn send_float(&self, value: f32, name: &str) -> Diagnosed<bool> {
        self.send(&value, name)
    }

    pub fn send_vec2(&self, value: Vec2, name: &str) -> Diagnosed<bool> {
        self.send(&value, name)
    }

    pub fn send_vec3(&self, value: Vec3, name: &str) -> Diagnosed<bool> {
        self.send(&value, name)
    }

    pub fn send_vec4(&self, value: Vec4, name: &str) -> Diagnosed<bool> {
        self.send(&value, name)
    }

    pub fn send_mat3(&self, value: &Mat4, name: &str) -> Diagnosed<bool> {
        self.send(&Mat3From(*value), name)
    }

    pub fn send_mat4(&self, value: &Mat4, name: &str) -> Diagnosed<bool> {
        self.send(value, name)
    }
}
