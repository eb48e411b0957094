// Joint geometry on 2-D keypoint positions

use crate::models::pose::Point2;

/// Angle at vertex `b` between rays b->a and b->c, in degrees, unfolded.
///
/// Absolute difference of the two rays' polar angles, so the result lies in
/// [0, 360). Reflex configurations come out above 180.
pub fn raw_angle_at(a: Point2, b: Point2, c: Point2) -> f32 {
    let to_c = (c.y - b.y).atan2(c.x - b.x);
    let to_a = (a.y - b.y).atan2(a.x - b.x);
    (to_c - to_a).to_degrees().abs()
}

/// Angle at vertex `b` folded into [0, 180] degrees
pub fn angle_at(a: Point2, b: Point2, c: Point2) -> f32 {
    let raw = raw_angle_at(a, b, c);
    raw.min(360.0 - raw)
}

/// Joint angle as the detectors see it
pub fn joint_angle(a: Point2, b: Point2, c: Point2, fold_reflex: bool) -> f32 {
    if fold_reflex {
        angle_at(a, b, c)
    } else {
        raw_angle_at(a, b, c)
    }
}

pub fn horizontal_distance(p: Point2, q: Point2) -> f32 {
    (p.x - q.x).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_straight_joint() {
        let angle = angle_at(p(0.0, 0.0), p(50.0, 0.0), p(100.0, 0.0));
        assert!((angle - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_at(p(0.0, 0.0), p(50.0, 0.0), p(50.0, 50.0));
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_reflex_angle_is_folded() {
        // Rays at +135 and -135 degrees from the vertex
        let a = p(-1.0, -1.0);
        let b = p(0.0, 0.0);
        let c = p(-1.0, 1.0);

        let raw = raw_angle_at(a, b, c);
        assert!((raw - 270.0).abs() < 0.01);
        assert!((angle_at(a, b, c) - 90.0).abs() < 0.01);
        assert!((joint_angle(a, b, c, false) - 270.0).abs() < 0.01);
    }

    #[test]
    fn test_angle_is_symmetric_and_bounded() {
        let points = [
            p(0.0, 0.0),
            p(10.0, -3.0),
            p(-7.5, 12.0),
            p(300.0, 200.0),
            p(-40.0, -90.0),
        ];
        for &a in &points {
            for &b in &points {
                for &c in &points {
                    let forward = angle_at(a, b, c);
                    let backward = angle_at(c, b, a);
                    assert!((0.0..=180.0).contains(&forward));
                    assert!((forward - backward).abs() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_vertex() {
        let angle = angle_at(p(5.0, 5.0), p(5.0, 5.0), p(10.0, 5.0));
        assert!((0.0..=180.0).contains(&angle));
    }

    #[test]
    fn test_horizontal_distance() {
        assert_eq!(horizontal_distance(p(100.0, 0.0), p(20.0, 50.0)), 80.0);
        assert_eq!(horizontal_distance(p(20.0, 0.0), p(100.0, 50.0)), 80.0);
    }
}
