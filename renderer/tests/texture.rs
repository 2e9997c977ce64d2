mod common;

use common::{device, fixture_path};
use gpu_harness::{gl, GradientCorners, Image, Texture};

fn gradient(width: i32, height: i32) -> Image {
    let mut image = Image::load(width, height);
    image.fill_gradient(&GradientCorners::cool());
    image
}

#[test]
fn texture_upload_uses_clamped_nearest_sampling() {
    let mut device = device();
    let mut image = gradient(4, 2);
    let mut texture = Texture::new();

    device.load_texture(&mut texture, &mut image);

    let record = device.driver().texture(texture.handle.raw()).unwrap();
    for pname in [gl::TEXTURE_WRAP_S, gl::TEXTURE_WRAP_T].iter() {
        assert_eq!(record.parameters[pname], gl::CLAMP_TO_EDGE);
    }
    for pname in [gl::TEXTURE_MIN_FILTER, gl::TEXTURE_MAG_FILTER].iter() {
        assert_eq!(record.parameters[pname], gl::NEAREST);
    }

    assert_eq!((texture.width, texture.height, texture.channels), (4, 2, 4));
    assert!(device.ctx.texture.slot().is_empty());
}

#[test]
fn texture_rows_are_uploaded_bottom_first() {
    let mut device = device();
    let original = gradient(3, 5);
    let mut image = original.clone();
    let mut texture = Texture::new();

    device.load_texture(&mut texture, &mut image);

    // the image is flipped in place
    assert_eq!(image.pixel(1, 0), original.pixel(1, 4));

    let record = device.driver().texture(texture.handle.raw()).unwrap();
    assert_eq!((record.width, record.height), (3, 5));

    let mut flipped = original;
    flipped.flip_vertically();
    assert_eq!(record.pixels, flipped.as_bytes());
}

#[test]
fn begin_and_end_bracket_the_texture_slot() {
    let mut device = device();
    let mut image = gradient(2, 2);
    let mut texture = Texture::new();
    device.load_texture(&mut texture, &mut image);

    device.begin_texture(&texture);
    assert_eq!(device.ctx.texture.slot().occupant(), Some(texture.handle));
    device.end_texture(&texture);
    assert!(device.ctx.is_unbound());
}

#[test]
fn unload_resets_the_texture() {
    let mut device = device();
    let mut image = gradient(2, 2);
    let mut texture = Texture::new();
    device.load_texture(&mut texture, &mut image);

    device.unload_texture(&mut texture);

    assert_eq!(texture, Texture::default());
    assert_eq!(device.driver().live_objects(), 0);
}

#[test]
#[should_panic(expected = "cannot destroy a null texture")]
fn unloading_a_texture_twice_fails() {
    let mut device = device();
    let mut image = gradient(2, 2);
    let mut texture = Texture::new();
    device.load_texture(&mut texture, &mut image);

    device.unload_texture(&mut texture);
    device.unload_texture(&mut texture);
}

#[test]
#[should_panic(expected = "texture has no GPU handle")]
fn unloaded_texture_cannot_be_bound() {
    let mut device = device();
    device.begin_texture(&Texture::new());
}

#[test]
#[should_panic(expected = "cannot upload an empty image")]
fn empty_image_cannot_be_uploaded() {
    let mut device = device();
    device.load_texture(&mut Texture::new(), &mut Image::default());
}

#[test]
fn gradient_survives_a_save_and_reload() {
    let image = gradient(17, 9);
    let path = fixture_path("gradient.png");

    image.save(&path).unwrap();
    let reloaded = Image::load_from_file(&path).unwrap();

    assert_eq!(reloaded, image);
}

#[test]
fn gradient_first_row_starts_with_the_top_left_color() {
    let image = gradient(6, 6);
    let corner = image.pixel(0, 0);
    let top_left = GradientCorners::cool().top_left;

    assert_eq!(corner.r, (top_left.x * 255.0) as u8);
    assert_eq!(corner.g, (top_left.y * 255.0) as u8);
    assert_eq!(corner.b, (top_left.z * 255.0) as u8);
}
