use super::super::{gl, GraphicsDriver};
use super::{BindingSlot, GpuHandle, SlotKind};
use std::rc::Rc;

#[derive(Copy, Clone, Debug)]
pub struct TextureFormat {
    internal_format: gl::GLenum,
    format: gl::GLenum,
    type_: gl::GLenum,
}

impl Default for TextureFormat {
    fn default() -> Self {
        Self {
            internal_format: gl::RGBA8,
            format: gl::RGBA,
            type_: gl::UNSIGNED_BYTE,
        }
    }
}

pub struct TextureState<D: GraphicsDriver> {
    driver: Rc<D>,
    slot: BindingSlot,
    format: TextureFormat,
}

impl<D: GraphicsDriver> TextureState<D> {
    pub fn build_initialized(driver: Rc<D>) -> Self {
        Self {
            driver,
            slot: BindingSlot::new(SlotKind::Texture),
            format: TextureFormat::default(),
        }
    }

    pub fn slot(&self) -> &BindingSlot {
        &self.slot
    }

    pub fn create_texture(&self) -> GpuHandle {
        let texture = GpuHandle::from_raw(self.driver.gen_texture());
        log::debug!("created texture {}", texture);
        texture
    }

    pub fn destroy_texture(&self, texture: &mut GpuHandle) {
        assert!(!texture.is_null(), "cannot destroy a null texture");
        assert!(
            self.slot.occupant() != Some(*texture),
            "texture {} is still bound",
            texture
        );

        self.driver.delete_texture(texture.raw());
        log::debug!("destroyed texture {}", texture);
        *texture = GpuHandle::NULL;
    }

    pub fn bind_texture(&mut self, texture: GpuHandle) -> &mut Self {
        self.slot.occupy(texture);
        self.driver.bind_texture(gl::TEXTURE_2D, texture.raw());

        self
    }

    pub fn unbind_texture(&mut self, texture: GpuHandle) {
        self.slot.release(texture);
        self.driver.bind_texture(gl::TEXTURE_2D, 0);
    }

    pub fn set_wrappings(&mut self, wrap: gl::GLenum) -> &mut Self {
        self.slot.expect_occupant("setting texture wrapping");
        self.driver
            .tex_parameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap);
        self.driver
            .tex_parameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap);

        self
    }

    pub fn set_min_mag_filter(&mut self, filter: gl::GLenum) -> &mut Self {
        self.slot.expect_occupant("setting texture filtering");
        self.driver
            .tex_parameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter);
        self.driver
            .tex_parameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter);

        self
    }

    /// Uploads tightly packed 8-bit RGBA rows, bottom row first.
    pub fn set_data(&mut self, width: u32, height: u32, data: &[u8]) -> &mut Self {
        self.slot.expect_occupant("uploading texture data");
        assert_eq!(
            data.len(),
            width as usize * height as usize * 4,
            "texture data does not match {}x{} RGBA",
            width,
            height
        );

        self.driver.tex_image_2d(
            gl::TEXTURE_2D,
            self.format.internal_format,
            width,
            height,
            self.format.format,
            self.format.type_,
            data,
        );

        self
    }
}
