// REF:: https://github.com/mrdoob/three.js/tree/dev/src/renderers/webgl

mod binding_slot;
mod buffer_state;
mod gl_context;
mod program_state;
mod texture_state;
mod vertex_array_state;

pub use binding_slot::*;
pub use buffer_state::*;
pub use gl_context::*;
pub use program_state::*;
pub use texture_state::*;
pub use vertex_array_state::*;
