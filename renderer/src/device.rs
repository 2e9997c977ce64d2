use super::*;
use crate::shapes::{generate, Shape};
use math::{Vec2, Vec3, Vec4};
use std::path::Path;

pub const SPHERE_TESSELLATION: u32 = 8;
pub const HEMISPHERE_TESSELLATION: u32 = 4;

/// Resource-level API over one [`OpenGLContext`].
///
/// Every operation leaves all binding slots as it found them, so calls can be
/// freely sequenced between `begin_frame` and `end_frame`.
pub struct RendererDevice<D: GraphicsDriver> {
    pub ctx: OpenGLContext<D>,
}

impl<D: GraphicsDriver> RendererDevice<D> {
    pub fn build_initialize(driver: D) -> Self {
        Self {
            ctx: OpenGLContext::build_initialize(driver),
        }
    }

    pub fn with_config(driver: D, config: ContextConfig) -> Self {
        Self {
            ctx: OpenGLContext::with_config(driver, config),
        }
    }

    pub fn driver(&self) -> &D {
        self.ctx.driver()
    }

    pub fn begin_frame(&mut self, clear: Vec4) {
        self.ctx.begin_frame(clear);
    }

    pub fn end_frame(&mut self) {
        self.ctx.end_frame();
    }

    // Meshes

    fn vertex_buffer_with<T: bytemuck::Pod>(&mut self, data: &[T]) -> GLBuffer {
        let buffer = self.ctx.buffer.create_buffer();
        self.ctx
            .buffer
            .bind_vertex_buffer(&buffer)
            .update_vertex_buffer(data);
        self.ctx.buffer.unbind_vertex_buffer(&buffer);

        buffer
    }

    fn describe<A: VertexAttribute>(&mut self, attribute: Attribute, buffer: &GLBuffer) {
        let location = attribute.location();

        self.ctx.vertex_array.enable_attribute(location);
        self.ctx.buffer.bind_vertex_buffer(buffer);
        self.ctx.set_vertex_attribute::<A>(location);
        self.ctx.buffer.unbind_vertex_buffer(buffer);
    }

    /// Uploads every present attribute of `mesh` to its own buffer and records
    /// the layout in a new vertex array.
    ///
    /// Absent texture coordinates, normals or indices are reported, in that
    /// order, and the mesh stays drawable without them.
    pub fn upload_mesh(&mut self, mesh: &mut Mesh) -> Diagnosed<()> {
        assert!(mesh.is_loaded(), "cannot upload a mesh without positions");
        assert!(
            !mesh.is_uploaded(),
            "mesh is already uploaded to vertex array {}",
            mesh.vao.0
        );

        let count = mesh.positions.len();
        if let Some(tcoords) = &mesh.tcoords {
            assert_eq!(tcoords.len(), count, "texture coordinate count differs from position count");
        }
        if let Some(normals) = &mesh.normals {
            assert_eq!(normals.len(), count, "normal count differs from position count");
        }
        if let Some(indices) = &mesh.indices {
            assert!(!indices.is_empty(), "index list is present but empty");
        }

        let mut result = Diagnosed::clean(());

        mesh.pbo = self.vertex_buffer_with(&mesh.positions);

        match &mesh.tcoords {
            Some(tcoords) => mesh.tbo = self.vertex_buffer_with(tcoords),
            None => result.push(self.ctx.raise(Warning::MissingAttribute(Attribute::TexCoord))),
        }

        match &mesh.normals {
            Some(normals) => mesh.nbo = self.vertex_buffer_with(normals),
            None => result.push(self.ctx.raise(Warning::MissingAttribute(Attribute::Normal))),
        }

        match &mesh.indices {
            Some(indices) => {
                let ibo = self.ctx.buffer.create_buffer();
                self.ctx
                    .buffer
                    .bind_index_buffer(&ibo)
                    .update_index_buffer(indices);
                self.ctx.buffer.unbind_index_buffer(&ibo);
                mesh.ibo = ibo;
            }
            None => result.push(self.ctx.raise(Warning::MissingIndexBuffer)),
        }

        mesh.vao = self.ctx.vertex_array.create();
        self.ctx.vertex_array.bind(&mesh.vao);

        // The element binding is part of the vertex array, so it must stay
        // bound until the vertex array is released.
        if !mesh.ibo.is_null() {
            self.ctx.buffer.bind_index_buffer(&mesh.ibo);
        }

        self.describe::<Vec3>(Attribute::Position, &mesh.pbo);
        if !mesh.tbo.is_null() {
            self.describe::<Vec2>(Attribute::TexCoord, &mesh.tbo);
        }
        if !mesh.nbo.is_null() {
            self.describe::<Vec3>(Attribute::Normal, &mesh.nbo);
        }

        self.ctx.vertex_array.unbind(&mesh.vao);

        if !mesh.ibo.is_null() {
            self.ctx.buffer.unbind_index_buffer(&mesh.ibo);
        }

        mesh.vertex_count = Some(mesh.indices.as_ref().map_or(count, Vec::len));

        log::debug!(
            "uploaded mesh to vertex array {} ({} vertices, {})",
            mesh.vao.0,
            count,
            if mesh.is_indexed() { "indexed" } else { "non-indexed" }
        );

        result
    }

    pub fn draw_mesh(&mut self, mesh: &Mesh) {
        let count = match mesh.vertex_count {
            Some(count) => count,
            None => panic!("cannot draw a mesh that is not loaded"),
        };
        assert!(mesh.is_uploaded(), "cannot draw a mesh that was never uploaded");

        self.ctx.vertex_array.bind(&mesh.vao);
        if mesh.is_indexed() {
            self.ctx.vertex_array.draw_indexed_triangles(count);
        } else {
            self.ctx.vertex_array.draw_triangles(count);
        }
        self.ctx.vertex_array.unbind(&mesh.vao);
    }

    /// Releases every allocated GPU object and clears the CPU geometry.
    /// Unloading the same mesh twice is an error.
    pub fn unload_mesh(&mut self, mesh: &mut Mesh) {
        assert!(mesh.vertex_count.is_some(), "mesh is not loaded");

        if !mesh.vao.is_null() {
            self.ctx.vertex_array.destroy(&mut mesh.vao);
        }

        for buffer in [&mut mesh.pbo, &mut mesh.tbo, &mut mesh.nbo, &mut mesh.ibo].iter_mut() {
            if !buffer.is_null() {
                self.ctx.buffer.destroy_buffer(buffer);
            }
        }

        mesh.positions.clear();
        mesh.tcoords = None;
        mesh.normals = None;
        mesh.indices = None;
        mesh.vertex_count = None;
    }

    pub fn load_mesh(&mut self, mut mesh: Mesh) -> Diagnosed<Mesh> {
        self.upload_mesh(&mut mesh).map(move |()| mesh)
    }

    pub fn load_mesh_shape(&mut self, shape: Shape) -> Diagnosed<Mesh> {
        self.load_mesh(Mesh::from_generated(generate(shape)))
    }

    pub fn load_mesh_plane(&mut self) -> Diagnosed<Mesh> {
        self.load_mesh(Mesh::quad_optimal())
    }

    pub fn load_mesh_sphere(&mut self) -> Diagnosed<Mesh> {
        self.load_mesh_shape(Shape::Sphere {
            slices: SPHERE_TESSELLATION,
            stacks: SPHERE_TESSELLATION,
        })
    }

    pub fn load_mesh_hemisphere(&mut self) -> Diagnosed<Mesh> {
        self.load_mesh_shape(Shape::Hemisphere {
            slices: HEMISPHERE_TESSELLATION,
            stacks: HEMISPHERE_TESSELLATION,
        })
    }

    pub fn load_mesh_tetrahedron(&mut self) -> Diagnosed<Mesh> {
        self.load_mesh_shape(Shape::Tetrahedron)
    }

    /// Centred on the origin.
    pub fn load_mesh_cube(&mut self) -> Diagnosed<Mesh> {
        let mut cube = generate(Shape::Cube);
        cube.translate(&Vec3::from_scalar(-0.5));

        self.load_mesh(Mesh::from_generated(cube))
    }

    pub fn load_mesh_octahedron(&mut self) -> Diagnosed<Mesh> {
        self.load_mesh_shape(Shape::Octahedron)
    }

    pub fn load_mesh_dodecahedron(&mut self) -> Diagnosed<Mesh> {
        self.load_mesh_shape(Shape::Dodecahedron)
    }

    pub fn load_mesh_icosahedron(&mut self) -> Diagnosed<Mesh> {
        self.load_mesh_shape(Shape::Icosahedron)
    }

    pub fn load_mesh_obj<P: AsRef<Path>>(&mut self, path: P) -> Result<Diagnosed<Mesh>, AssetError> {
        let obj = ObjData::load(path)?;
        Ok(self.load_mesh(Mesh::from_obj(&obj)))
    }

    // Textures

    /// Flips `image` in place to the GPU's bottom-left origin and uploads it
    /// with clamped, unfiltered sampling. No texture stays bound afterwards.
    pub fn load_texture(&mut self, texture: &mut Texture, image: &mut Image) {
        assert!(image.is_loaded(), "cannot upload an empty image");
        assert_eq!(
            image.channels, IMAGE_CHANNELS,
            "textures are uploaded as 4-channel RGBA"
        );
        assert!(
            !texture.is_loaded(),
            "texture {} is already loaded",
            texture.handle
        );

        let handle = self.ctx.texture.create_texture();
        image.flip_vertically();

        self.ctx
            .texture
            .bind_texture(handle)
            .set_wrappings(gl::CLAMP_TO_EDGE)
            .set_min_mag_filter(gl::NEAREST)
            .set_data(image.width as u32, image.height as u32, image.as_bytes());
        self.ctx.texture.unbind_texture(handle);

        *texture = Texture {
            handle,
            width: image.width,
            height: image.height,
            channels: image.channels,
        };
    }

    pub fn unload_texture(&mut self, texture: &mut Texture) {
        self.ctx.texture.destroy_texture(&mut texture.handle);
        *texture = Texture::default();
    }

    pub fn begin_texture(&mut self, texture: &Texture) {
        assert!(texture.is_loaded(), "texture has no GPU handle");
        self.ctx.texture.bind_texture(texture.handle);
    }

    pub fn end_texture(&mut self, texture: &Texture) {
        self.ctx.texture.unbind_texture(texture.handle);
    }

    // Shaders

    pub fn create_shader<P: AsRef<Path>>(&mut self, stage: ShaderStage, path: P) -> Diagnosed<GLShader> {
        self.ctx.program.create_shader(stage, path)
    }

    pub fn destroy_shader(&mut self, shader: &mut GLShader) {
        self.ctx.program.destroy_shader(shader);
    }

    pub fn create_program(&mut self, vertex: &GLShader, fragment: &GLShader) -> Diagnosed<GLProgram> {
        self.ctx.program.create_program(vertex, fragment)
    }

    /// Compiles both stages, links them and releases the stage objects.
    pub fn load_program<P: AsRef<Path>>(&mut self, vertex: P, fragment: P) -> Diagnosed<GLProgram> {
        let (mut vs, mut warnings) = self.create_shader(ShaderStage::Vertex, vertex).into_parts();
        let (mut fs, fs_warnings) = self.create_shader(ShaderStage::Fragment, fragment).into_parts();
        warnings.extend(fs_warnings);

        let (program, link_warnings) = self.create_program(&vs, &fs).into_parts();
        warnings.extend(link_warnings);

        for shader in [&mut vs, &mut fs].iter_mut() {
            if !shader.is_null() {
                self.destroy_shader(shader);
            }
        }

        Diagnosed::with_warnings(program, warnings)
    }

    pub fn destroy_program(&mut self, program: &mut GLProgram) {
        self.ctx.program.destroy_program(program);
    }

    pub fn begin_shader(&mut self, program: &GLProgram) {
        self.ctx.program.bind(program);
    }

    pub fn end_shader(&mut self, program: &GLProgram) {
        self.ctx.program.unbind(program);
    }

    pub fn send<T: Uniform>(&self, value: &T, name: &str) -> Diagnosed<bool> {
        self.ctx.program.send(value, name)
    }
}

#[cfg(feature = "window")]
impl RendererDevice<GlDriver> {
    pub fn from_window(
        window_context: &glutin::ContextWrapper<glutin::PossiblyCurrent, winit::window::Window>,
    ) -> Self {
        Self {
            ctx: OpenGLContext::from_window(window_context),
        }
    }
}
