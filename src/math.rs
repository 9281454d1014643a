/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Wraps an angle in degrees into `[0, 360)`
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Returns true if `angle` lies on the arc starting at `start` and running `sweep` degrees.
///
/// Positive sweeps run clockwise (y-down screen space), negative sweeps counter-clockwise.
/// A sweep of a full turn or more covers every angle.
pub fn angle_in_sweep(angle: f64, start: f64, sweep: f64) -> bool {
    if sweep.abs() >= 360.0 {
        return true;
    }
    if sweep >= 0.0 {
        normalize_degrees(angle - start) <= sweep
    } else {
        normalize_degrees(start - angle) <= -sweep
    }
}

/// Angle in degrees of `p` as seen from `center`, in `[0, 360)`
pub fn angle_of(center: [f64; 2], p: [f64; 2]) -> f64 {
    let dx = p[0] - center[0];
    let dy = p[1] - center[1];
    normalize_degrees(dy.atan2(dx).to_degrees())
}

/// Point on an axis-aligned ellipse at the given angle in degrees
pub fn point_on_ellipse(center: [f64; 2], rx: f64, ry: f64, angle: f64) -> [f64; 2] {
    let (sin_a, cos_a) = angle.to_radians().sin_cos();
    [center[0] + rx * cos_a, center[1] + ry * sin_a]
}

/// Normalized squared radius of `p` relative to an ellipse; `<= 1.0` means inside
pub fn ellipse_value(center: [f64; 2], rx: f64, ry: f64, p: [f64; 2]) -> f64 {
    let nx = (p[0] - center[0]) / rx;
    let ny = (p[1] - center[1]) / ry;
    nx * nx + ny * ny
}

/// Approximate distance from `p` to the outline of an axis-aligned ellipse
pub fn distance_to_ellipse(center: [f64; 2], rx: f64, ry: f64, p: [f64; 2]) -> f64 {
    let normalized = ellipse_value(center, rx, ry, p).sqrt();
    (normalized - 1.0).abs() * rx.min(ry)
}

/// Euclidean distance between two points
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    (dx * dx + dy * dy).sqrt()
}

/// Distance from `p` to the segment `a`-`b`
pub fn distance_to_segment(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> f64 {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let length_sq = ab[0] * ab[0] + ab[1] * ab[1];
    if length_sq == 0.0 {
        return distance(a, p);
    }
    let t = (((p[0] - a[0]) * ab[0] + (p[1] - a[1]) * ab[1]) / length_sq).clamp(0.0, 1.0);
    distance([a[0] + ab[0] * t, a[1] + ab[1] * t], p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_negative_and_large_angles() {
        assert_eq!(normalize_degrees(-45.0), 315.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(405.0), 45.0);
    }

    #[test]
    fn positive_sweep_runs_clockwise() {
        assert!(angle_in_sweep(90.0, 45.0, 270.0));
        assert!(angle_in_sweep(315.0, 45.0, 270.0));
        assert!(!angle_in_sweep(0.0, 45.0, 270.0));
        assert!(!angle_in_sweep(330.0, 45.0, 270.0));
    }

    #[test]
    fn negative_sweep_runs_counter_clockwise() {
        // -45 sweeping -45 covers 270..315
        assert!(angle_in_sweep(290.0, -45.0, -45.0));
        assert!(!angle_in_sweep(320.0, -45.0, -45.0));
        assert!(!angle_in_sweep(10.0, -45.0, -45.0));
        assert!(angle_in_sweep(0.0, -0.0, -45.0));
    }

    #[test]
    fn full_turn_covers_everything() {
        assert!(angle_in_sweep(123.0, 10.0, 360.0));
        assert!(angle_in_sweep(123.0, 10.0, -400.0));
    }

    #[test]
    fn angle_of_uses_screen_orientation() {
        let c = [0.0, 0.0];
        assert_eq!(angle_of(c, [1.0, 0.0]), 0.0);
        assert!((angle_of(c, [0.0, 1.0]) - 90.0).abs() < 1e-9);
        assert!((angle_of(c, [0.0, -1.0]) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn segment_distance_clamps_to_end_points() {
        let a = [0.0, 0.0];
        let b = [10.0, 0.0];
        assert_eq!(distance_to_segment(a, b, [5.0, 3.0]), 3.0);
        assert_eq!(distance_to_segment(a, b, [13.0, 4.0]), 5.0);
        assert_eq!(distance_to_segment(a, a, [3.0, 4.0]), 5.0);
    }

    #[test]
    fn lerp_hits_both_ends() {
        assert_eq!(lerp(0.0, 45.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 45.0, 1.0), 45.0);
        assert_eq!(lerp(0.0, 45.0, 0.5), 22.5);
    }
}
