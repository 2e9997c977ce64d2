mod consts;
mod mat4;
mod utils;
mod vec2;
mod vec3;
mod vec4;

pub use consts::*;
pub use mat4::*;
pub use utils::*;
pub use vec2::*;
pub use vec3::*;
pub use vec4::*;
