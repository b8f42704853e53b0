//! Relative-quadrant classification between two junction coordinates

use super::types::Point;

/// The quadrant the source junction occupies relative to the target junction.
///
/// ```text
///      TopLeft  |  TopRight
///     ----------+-----------
///     BottomLeft | BottomRight
/// ```
///
/// The codes select entries in the routing table. Classification compares the
/// junction coordinates actually used for routing, not shape centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Direction {
    /// All directions in code order
    pub const ALL: [Direction; 4] = [
        Direction::TopLeft,
        Direction::TopRight,
        Direction::BottomRight,
        Direction::BottomLeft,
    ];

    /// Classify where `source` sits relative to `target`.
    ///
    /// Total function: equality on either axis falls through to `TopLeft`,
    /// so callers never see an undefined case.
    pub fn classify(source: Point, target: Point) -> Direction {
        if source.x > target.x && source.y > target.y {
            Direction::BottomRight
        } else if source.x < target.x && source.y < target.y {
            Direction::TopLeft
        } else if source.x > target.x && source.y < target.y {
            Direction::TopRight
        } else if source.x < target.x && source.y > target.y {
            Direction::BottomLeft
        } else {
            Direction::TopLeft
        }
    }

    /// The numeric code of this direction (`0..=3`)
    pub fn code(&self) -> u8 {
        match self {
            Direction::TopLeft => 0,
            Direction::TopRight => 1,
            Direction::BottomRight => 2,
            Direction::BottomLeft => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_quadrants() {
        let target = Point::new(100.0, 100.0);
        assert_eq!(
            Direction::classify(Point::new(200.0, 200.0), target),
            Direction::BottomRight
        );
        assert_eq!(
            Direction::classify(Point::new(0.0, 0.0), target),
            Direction::TopLeft
        );
        assert_eq!(
            Direction::classify(Point::new(200.0, 0.0), target),
            Direction::TopRight
        );
        assert_eq!(
            Direction::classify(Point::new(0.0, 200.0), target),
            Direction::BottomLeft
        );
    }

    #[test]
    fn test_classify_ties_default_to_top_left() {
        let target = Point::new(100.0, 100.0);
        // Equal on one axis
        assert_eq!(
            Direction::classify(Point::new(100.0, 300.0), target),
            Direction::TopLeft
        );
        assert_eq!(
            Direction::classify(Point::new(300.0, 100.0), target),
            Direction::TopLeft
        );
        // Equal on both axes
        assert_eq!(Direction::classify(target, target), Direction::TopLeft);
    }

    #[test]
    fn test_direction_codes() {
        assert_eq!(Direction::TopLeft.code(), 0);
        assert_eq!(Direction::TopRight.code(), 1);
        assert_eq!(Direction::BottomRight.code(), 2);
        assert_eq!(Direction::BottomLeft.code(), 3);
    }
}
