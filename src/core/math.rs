// Math utilities and helper functions

use glam::Vec2;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Unit direction for a heading in degrees.
///
/// Headings are measured with 0° pointing up the screen (negative y) and
/// increasing clockwise, so the trigonometric angle is `heading - 90°`.
pub fn heading_vector(heading_degrees: f32) -> Vec2 {
    let radians = (heading_degrees - 90.0).to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_heading_zero_points_up() {
        let dir = heading_vector(0.0);
        assert_abs_diff_eq!(dir.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(dir.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_heading_ninety_points_right() {
        let dir = heading_vector(90.0);
        assert_abs_diff_eq!(dir.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(dir.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_heading_wraps_through_trig() {
        let a = heading_vector(45.0);
        let b = heading_vector(45.0 + 360.0);
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-4);
    }
}
