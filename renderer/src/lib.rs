pub mod component;
pub mod device;
pub mod diagnostics;
pub mod error;
pub mod image_data;
pub mod logging;
pub mod mesh;
#[path = "gl_backend_renderer/mod.rs"]
pub mod renderer;
pub mod shapes;
pub mod wavefront;

pub use self::renderer::*;
pub use component::*;
pub use device::*;
pub use diagnostics::*;
pub use error::*;
pub use image_data::*;
pub use logging::*;
pub use mesh::*;
pub use shapes::{GeneratedMesh, Shape};
pub use wavefront::*;
