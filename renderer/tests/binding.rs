mod common;

use gpu_harness::{HeadlessDriver, OpenGLContext};
use math::Vec4;
use std::panic::{self, AssertUnwindSafe};

fn context() -> OpenGLContext<HeadlessDriver> {
    OpenGLContext::build_initialize(HeadlessDriver::new())
}

#[test]
fn second_nested_bind_fails_and_unbind_reopens_the_slot() {
    let mut ctx = context();
    let first = ctx.vertex_array.create();
    let second = ctx.vertex_array.create();

    ctx.vertex_array.bind(&first);

    let nested = panic::catch_unwind(AssertUnwindSafe(|| {
        ctx.vertex_array.bind(&second);
    }));
    assert!(nested.is_err());
    assert_eq!(ctx.vertex_array.slot().occupant(), Some(first.0));

    ctx.vertex_array.unbind(&first);
    ctx.vertex_array.bind(&second);
    assert_eq!(ctx.vertex_array.slot().occupant(), Some(second.0));
    ctx.vertex_array.unbind(&second);

    assert!(ctx.is_unbound());
}

#[test]
#[should_panic(expected = "vertex buffer slot already holds")]
fn vertex_buffer_slot_rejects_nesting() {
    let mut ctx = context();
    let a = ctx.buffer.create_buffer();
    let b = ctx.buffer.create_buffer();

    ctx.buffer.bind_vertex_buffer(&a);
    ctx.buffer.bind_vertex_buffer(&b);
}

#[test]
#[should_panic(expected = "shader program slot is empty")]
fn unbinding_an_empty_slot_fails() {
    let mut ctx = context();
    let program = gpu_harness::GLProgram(gpu_harness::GpuHandle::from_raw(7));

    ctx.program.unbind(&program);
}

#[test]
fn different_slots_nest_freely() {
    let mut ctx = context();
    let vao = ctx.vertex_array.create();
    let vbo = ctx.buffer.create_buffer();
    let ibo = ctx.buffer.create_buffer();
    let texture = ctx.texture.create_texture();

    ctx.vertex_array.bind(&vao);
    ctx.buffer.bind_vertex_buffer(&vbo);
    ctx.buffer.bind_index_buffer(&ibo);
    ctx.texture.bind_texture(texture);

    assert!(!ctx.is_unbound());

    ctx.texture.unbind_texture(texture);
    ctx.buffer.unbind_index_buffer(&ibo);
    ctx.buffer.unbind_vertex_buffer(&vbo);
    ctx.vertex_array.unbind(&vao);

    assert!(ctx.is_unbound());
}

#[test]
#[should_panic(expected = "uploading vertex data requires a bound vertex buffer")]
fn upload_without_bound_buffer_fails() {
    let mut ctx = context();
    ctx.buffer.update_vertex_buffer(&[1.0f32, 2.0, 3.0]);
}

#[test]
#[should_panic(expected = "cannot destroy a null buffer")]
fn destroying_a_buffer_twice_fails() {
    let ctx = context();
    let mut buffer = ctx.buffer.create_buffer();

    ctx.buffer.destroy_buffer(&mut buffer);
    assert!(buffer.is_null());
    ctx.buffer.destroy_buffer(&mut buffer);
}

#[test]
#[should_panic(expected = "cannot destroy a null vertex array")]
fn destroying_a_vertex_array_twice_fails() {
    let ctx = context();
    let mut vao = ctx.vertex_array.create();

    ctx.vertex_array.destroy(&mut vao);
    ctx.vertex_array.destroy(&mut vao);
}

#[test]
#[should_panic(expected = "vertex array slot still holds")]
fn frame_cannot_end_with_a_bound_slot() {
    let mut ctx = context();
    let vao = ctx.vertex_array.create();

    ctx.begin_frame(Vec4::new(0.0, 0.0, 0.0, 1.0));
    ctx.vertex_array.bind(&vao);
    ctx.end_frame();
}

#[test]
fn independent_contexts_do_not_share_slots() {
    let mut a = context();
    let mut b = context();
    let vao_a = a.vertex_array.create();
    let vao_b = b.vertex_array.create();

    a.vertex_array.bind(&vao_a);
    b.vertex_array.bind(&vao_b);

    a.vertex_array.unbind(&vao_a);
    b.vertex_array.unbind(&vao_b);
}

#[test]
#[should_panic(expected = "texture data does not match 2x3 RGBA")]
fn texture_data_length_is_checked_against_dimensions() {
    let mut ctx = context();
    let texture = ctx.texture.create_texture();

    ctx.texture.bind_texture(texture);
    ctx.texture.set_data(2, 3, &[0u8; 2 * 3 * 3]);
}
