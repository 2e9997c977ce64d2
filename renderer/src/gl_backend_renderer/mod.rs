pub mod context;
pub mod driver;
pub mod gl;
pub mod gl_vertex_format;
pub mod headless;

pub use context::*;
pub use driver::*;
pub use gl_vertex_format::*;
pub use headless::*;
