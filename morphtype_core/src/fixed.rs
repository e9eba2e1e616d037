//! 26.6 fixed-point helpers (1/64 pixel), the unit shaped positions use.

/// Subpixel steps per pixel.
pub const SUBPIXELS: f32 = 64.0;

/// Convert a pixel distance to 26.6, rounding to the nearest step.
pub fn to_fixed(px: f32) -> i32 {
    (px * SUBPIXELS).round() as i32
}

/// Convert a 26.6 value back to pixels.
pub fn to_pixels(value: i32) -> f32 {
    value as f32 / SUBPIXELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_pixels_survive() {
        assert_eq!(to_fixed(3.0), 192);
        assert!((to_pixels(192) - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rounds_to_nearest_step() {
        assert_eq!(to_fixed(0.5 / 64.0 + 1.0), 65);
        assert_eq!(to_fixed(-1.0), -64);
    }
}
