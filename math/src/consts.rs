pub const PI: f32 = std::f32::consts::PI;
pub const TAU: f32 = 2.0 * PI;
pub const HALF_PI: f32 = PI / 2.0;
