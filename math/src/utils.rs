#[inline]
pub fn one_when_zero(value: f32) -> f32 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
