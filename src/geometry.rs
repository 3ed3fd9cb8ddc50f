//! Polar-to-cartesian conversion and SVG arc path construction.
//!
//! Angles are in degrees, measured clockwise from 12 o'clock.

use derive_more::{AsRef, Deref, Display, From, Into};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// SVG path data (`d` attribute).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct PathData(String);

pub fn percentage_to_angle(p: f64) -> f64 {
    360.0 * p
}

/// Converts a clockwise-from-top angle to a point on the circle. Zero maps to
/// "up" rather than the usual "right".
pub fn polar_to_cartesian(center_x: f64, center_y: f64, radius: f64, angle_degrees: f64) -> Point {
    let angle_radians = (angle_degrees - 90.0).to_radians();

    Point::new(
        center_x + radius * angle_radians.cos(),
        center_y + radius * angle_radians.sin(),
    )
}

/// Inverse of [`polar_to_cartesian`]: the clockwise-from-top angle of `point`
/// around `center`, normalized to `[0, 360)`.
pub fn clockwise_angle(center: Point, point: Point) -> f64 {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    (dy.atan2(dx).to_degrees() + 90.0).rem_euclid(360.0)
}

pub fn large_arc_flag(start_angle: f64, end_angle: f64) -> &'static str {
    if end_angle - start_angle <= 180.0 {
        "0"
    } else {
        "1"
    }
}

/// Describes a circular arc from `start_angle` to `end_angle`.
///
/// The path starts at the end-angle point and sweeps counter-clockwise (sweep
/// flag `0`) back to the start-angle point. Callers pass `start_angle <=
/// end_angle`; an empty range yields a degenerate, point-like path.
pub fn describe_arc(x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> PathData {
    let start = polar_to_cartesian(x, y, radius, end_angle);
    let end = polar_to_cartesian(x, y, radius, start_angle);
    let large_arc = large_arc_flag(start_angle, end_angle);

    PathData(format!(
        "M {} {} A {radius} {radius} 0 {large_arc} 0 {} {}",
        start.x, start.y, end.x, end.y
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn tokens(path: &PathData) -> Vec<&str> {
        path.split_whitespace().collect()
    }

    #[test]
    fn test_percentage_to_angle_scales_linearly() {
        for p in [0.0, 0.1, 0.3, 0.6, 1.0, -0.25, 1.5] {
            assert_eq!(percentage_to_angle(p), 360.0 * p);
        }
    }

    #[test]
    fn test_polar_zero_is_top() {
        let p = polar_to_cartesian(0.0, 0.0, 10.0, 0.0);
        assert!(p.x.abs() < EPS);
        assert!((p.y + 10.0).abs() < EPS);

        let p = polar_to_cartesian(0.0, 0.0, 10.0, 90.0);
        assert!((p.x - 10.0).abs() < EPS);
        assert!(p.y.abs() < EPS);
    }

    #[test]
    fn test_polar_stays_on_circle() {
        let center = Point::new(50.0, 50.0);
        for step in -8..=16 {
            let angle = step as f64 * 37.5;
            let p = polar_to_cartesian(center.x, center.y, 40.0, angle);
            assert!((p.distance(center) - 40.0).abs() < EPS, "angle {angle}");
        }
    }

    #[test]
    fn test_clockwise_angle_inverts_polar() {
        let center = Point::new(50.0, 50.0);
        for angle in [1.0, 45.0, 90.0, 180.0, 234.0, 300.0, 359.0] {
            let p = polar_to_cartesian(center.x, center.y, 40.0, angle);
            assert!((clockwise_angle(center, p) - angle).abs() < 1e-6, "angle {angle}");
        }
    }

    #[test]
    fn test_describe_arc_shape() {
        let path = describe_arc(50.0, 50.0, 40.0, 0.0, 216.5);
        assert!(path.starts_with("M "));
        assert_eq!(path.matches("A ").count(), 1);

        let t = tokens(&path);
        assert_eq!(t.len(), 11);
        assert_eq!(t[3], "A");
        assert_eq!(t[4], "40");
        assert_eq!(t[5], "40");
        assert_eq!(t[6], "0");
        assert_eq!(t[8], "0", "sweep flag is fixed");
    }

    #[test]
    fn test_describe_arc_draws_from_end_to_start() {
        let path = describe_arc(50.0, 50.0, 40.0, 0.0, 90.0);
        let t = tokens(&path);
        let first: Vec<f64> = [t[1], t[2], t[9], t[10]]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        // move-to lands on 90 degrees (right), arc ends at 0 degrees (top)
        assert!((first[0] - 90.0).abs() < EPS);
        assert!((first[1] - 50.0).abs() < EPS);
        assert!((first[2] - 50.0).abs() < EPS);
        assert!((first[3] - 10.0).abs() < EPS);
    }

    #[test]
    fn test_large_arc_flag() {
        let cases = [
            (0.0, 90.0, "0"),
            (0.0, 180.0, "0"),
            (10.0, 190.0, "0"),
            (0.0, 180.5, "1"),
            (0.0, 216.5, "1"),
            (252.0, 360.5, "0"),
        ];

        for (start, end, expected) in cases {
            assert_eq!(large_arc_flag(start, end), expected, "{start}..{end}");
            let path = describe_arc(50.0, 50.0, 40.0, start, end);
            assert_eq!(tokens(&path)[7], expected, "{start}..{end}");
        }
    }

    #[test]
    fn test_degenerate_arc() {
        let path = describe_arc(50.0, 50.0, 40.0, 30.0, 30.0);
        let t = tokens(&path);
        assert_eq!(t[1], t[9]);
        assert_eq!(t[2], t[10]);
        assert_eq!(t[7], "0");
    }
}
