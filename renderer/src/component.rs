use super::GpuHandle;

/// GPU-only image. Dimensions mirror the source image at upload time.
#[derive(Debug, PartialEq)]
pub struct Texture {
    pub handle: GpuHandle,
    pub width: i32,
    pub height: i32,
    pub channels: i32,
}

impl Default for Texture {
    fn default() -> Self {
        Self {
            handle: GpuHandle::NULL,
            width: -1,
            height: -1,
            channels: -1,
        }
    }
}

impl Texture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        !self.handle.is_null()
    }
}
