use crate::AssetError;
use bytemuck::{Pod, Zeroable};
use math::Vec3;
use std::path::Path;

pub const IMAGE_CHANNELS: i32 = 4;

/// One RGBA pixel, 8 bits per channel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Pixel {
    fn default() -> Self {
        Self {
            r: 0x0,
            g: 0x0,
            b: 0x0,
            a: 0xFF,
        }
    }
}

/// Colors at the four corners of UV space. V grows upward, so `top_left`
/// lands on the first image row.
#[derive(Debug, Clone, Copy)]
pub struct GradientCorners {
    pub bottom_left: Vec3,
    pub bottom_right: Vec3,
    pub top_left: Vec3,
    pub top_right: Vec3,
}

impl GradientCorners {
    pub fn warm() -> Self {
        Self {
            bottom_left: Vec3::new(),
            bottom_right: Vec3::unit_x(),
            top_left: Vec3::unit_y(),
            top_right: Vec3::from_components(1.0, 1.0, 0.0),
        }
    }

    pub fn cool() -> Self {
        Self {
            bottom_left: Vec3::unit_z(),
            bottom_right: Vec3::from_components(1.0, 0.0, 1.0),
            top_left: Vec3::from_components(0.0, 1.0, 1.0),
            top_right: Vec3::from_scalar(1.0),
        }
    }
}

/// CPU-only pixel storage, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: i32,
    pub height: i32,
    pub channels: i32,
    pub pixels: Vec<Pixel>,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            width: -1,
            height: -1,
            channels: -1,
            pixels: Vec::new(),
        }
    }
}

impl Image {
    /// Allocates `width * height` opaque black pixels.
    pub fn load(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "image dimensions must be positive, got {}x{}",
            width,
            height
        );

        Self {
            width,
            height,
            channels: IMAGE_CHANNELS,
            pixels: vec![Pixel::default(); width as usize * height as usize],
        }
    }

    pub fn unload(&mut self) {
        *self = Self::default();
    }

    pub fn is_loaded(&self) -> bool {
        self.width > 0 && self.height > 0 && self.pixels.len() == self.width as usize * self.height as usize
    }

    pub fn pixel(&self, x: i32, y: i32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Bilinear blend of the corner colors; each channel is scaled to 0..255
    /// and truncated. Alpha is left untouched.
    pub fn fill_gradient(&mut self, corners: &GradientCorners) {
        for y in 0..self.height {
            for x in 0..self.width {
                let u = x as f32 / self.width as f32;
                let v = 1.0 - y as f32 / self.height as f32;

                let bottom = Vec3::from_lerp(&corners.bottom_left, &corners.bottom_right, u);
                let top = Vec3::from_lerp(&corners.top_left, &corners.top_right, u);
                let c = Vec3::from_lerp(&bottom, &top, v);

                let index = self.index(x, y);
                let pixel = &mut self.pixels[index];
                pixel.r = (c.x * 255.0) as u8;
                pixel.g = (c.y * 255.0) as u8;
                pixel.b = (c.z * 255.0) as u8;
            }
        }
    }

    pub fn flip_vertically(&mut self) {
        let width = self.width as usize;
        let height = self.height as usize;

        for row in 0..height / 2 {
            let (upper, lower) = self.pixels.split_at_mut((height - 1 - row) * width);
            upper[row * width..(row + 1) * width].swap_with_slice(&mut lower[..width]);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Writes a PNG.
    ///
    /// Panics unless the image has 4 channels.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AssetError> {
        let path = path.as_ref();
        assert_eq!(
            self.channels, IMAGE_CHANNELS,
            "only 4-channel images can be saved"
        );

        image::save_buffer_with_format(
            path,
            self.as_bytes(),
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Decodes any supported image file into RGBA8.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|source| AssetError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();

        let (width, height) = decoded.dimensions();
        let pixels: Vec<Pixel> = bytemuck::pod_collect_to_vec(decoded.as_raw().as_slice());

        Ok(Self {
            width: width as i32,
            height: height as i32,
            channels: IMAGE_CHANNELS,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(p: Pixel) -> [u8; 4] {
        [p.r, p.g, p.b, p.a]
    }

    #[test]
    fn load_allocates_opaque_black() {
        let image = Image::load(3, 2);

        assert_eq!(image.pixels.len(), 6);
        assert_eq!(image.channels, 4);
        assert!(image.pixels.iter().all(|p| bytes(*p) == [0, 0, 0, 255]));
    }

    #[test]
    fn unload_resets_to_sentinel() {
        let mut image = Image::load(2, 2);
        image.unload();

        assert!(!image.is_loaded());
        assert_eq!((image.width, image.height, image.channels), (-1, -1, -1));
    }

    #[test]
    fn first_row_starts_at_top_left_color() {
        let mut image = Image::load(8, 8);
        image.fill_gradient(&GradientCorners::warm());

        // top-left of warm is pure green
        assert_eq!(bytes(image.pixel(0, 0)), [0, 255, 0, 255]);
    }

    #[test]
    fn gradient_is_monotonic_along_both_axes() {
        let mut image = Image::load(16, 16);
        image.fill_gradient(&GradientCorners::warm());

        for y in 0..16 {
            for x in 1..16 {
                assert!(image.pixel(x, y).r >= image.pixel(x - 1, y).r);
            }
        }
        for x in 0..16 {
            for y in 1..16 {
                // green fades out toward the bottom rows
                assert!(image.pixel(x, y).g <= image.pixel(x, y - 1).g);
            }
        }
    }

    #[test]
    fn flip_swaps_rows() {
        let mut image = Image::load(2, 3);
        for (i, pixel) in image.pixels.iter_mut().enumerate() {
            pixel.r = i as u8;
        }

        image.flip_vertically();

        let reds: Vec<u8> = image.pixels.iter().map(|p| p.r).collect();
        assert_eq!(reds, vec![4, 5, 2, 3, 0, 1]);
    }

    #[test]
    #[should_panic(expected = "only 4-channel images can be saved")]
    fn save_rejects_wrong_channel_count() {
        let mut image = Image::load(1, 1);
        image.channels = 3;

        let path = std::env::temp_dir().join("gpu_harness_channels.png");
        let _ = image.save(&path);
    }

    #[test]
    fn pixel_addresses_rows_in_usize() {
        let mut image = Image::load(3, 2);
        image.pixels[5].g = 200;

        assert_eq!(image.pixel(2, 1).g, 200);
        assert_eq!(image.index(2, 1), 5);
        assert!(image.is_loaded());
    }
}
