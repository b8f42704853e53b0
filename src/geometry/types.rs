//! Core geometric types shared by the junction provider and the router

use serde::{Deserialize, Serialize};

/// A 2D point in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// The layout box of a shape: its un-rotated axis-aligned bounding box plus
/// the live scale factors applied during a resize drag.
///
/// Rotation is deliberately not part of this type. A rotated shape still
/// reports its un-rotated layout box here, so junctions and routed paths stay
/// axis-aligned while the visual transform is applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl BoundingBox {
    /// Create a bounding box with unit scale
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Set the live scale factors
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    /// Width with the live scale applied
    pub fn scaled_width(&self) -> f64 {
        self.width * self.scale_x
    }

    /// Height with the live scale applied
    pub fn scaled_height(&self) -> f64 {
        self.height * self.scale_y
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.scaled_width()
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.scaled_height()
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.scaled_width() / 2.0,
            y: self.y + self.scaled_height() / 2.0,
        }
    }
}

/// One of the four fixed connection points on a shape's layout box.
///
/// Junctions are derived coordinates, never persisted: they are recomputed
/// from the current box whenever a shape moves or resizes. The wire format is
/// the bare index `0..=3`, matching the order top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Junction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Junction {
    /// All junctions in index order
    pub const ALL: [Junction; 4] = [
        Junction::Top,
        Junction::Right,
        Junction::Bottom,
        Junction::Left,
    ];

    /// The fixed index of this junction (`0..=3`)
    pub fn index(&self) -> usize {
        match self {
            Junction::Top => 0,
            Junction::Right => 1,
            Junction::Bottom => 2,
            Junction::Left => 3,
        }
    }

    /// Outward unit normal of the box edge this junction sits on
    pub fn outward(&self) -> (f64, f64) {
        match self {
            Junction::Top => (0.0, -1.0),
            Junction::Right => (1.0, 0.0),
            Junction::Bottom => (0.0, 1.0),
            Junction::Left => (-1.0, 0.0),
        }
    }

    /// The junction on the directly facing side
    pub fn opposite(&self) -> Junction {
        match self {
            Junction::Top => Junction::Bottom,
            Junction::Right => Junction::Left,
            Junction::Bottom => Junction::Top,
            Junction::Left => Junction::Right,
        }
    }
}

impl From<Junction> for u8 {
    fn from(junction: Junction) -> u8 {
        junction.index() as u8
    }
}

impl TryFrom<u8> for Junction {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Junction::Top),
            1 => Ok(Junction::Right),
            2 => Ok(Junction::Bottom),
            3 => Ok(Junction::Left),
            other => Err(format!("junction index out of range: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bb.right(), 110.0);
        assert_eq!(bb.bottom(), 70.0);
    }

    #[test]
    fn test_bounding_box_scaled_edges() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 50.0).with_scale(2.0, 0.5);
        assert_eq!(bb.scaled_width(), 200.0);
        assert_eq!(bb.scaled_height(), 25.0);
        assert_eq!(bb.right(), 200.0);
        assert_eq!(bb.bottom(), 25.0);
    }

    #[test]
    fn test_bounding_box_center() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let center = bb.center();
        assert_eq!(center.x, 50.0);
        assert_eq!(center.y, 25.0);
    }

    #[test]
    fn test_junction_index_round_trip() {
        for junction in Junction::ALL {
            let index = junction.index() as u8;
            assert_eq!(Junction::try_from(index), Ok(junction));
        }
        assert!(Junction::try_from(4u8).is_err());
    }

    #[test]
    fn test_junction_opposite() {
        assert_eq!(Junction::Top.opposite(), Junction::Bottom);
        assert_eq!(Junction::Right.opposite(), Junction::Left);
        assert_eq!(Junction::Bottom.opposite(), Junction::Top);
        assert_eq!(Junction::Left.opposite(), Junction::Right);
    }

    #[test]
    fn test_junction_serializes_as_index() {
        let json = serde_json::to_string(&Junction::Left).unwrap();
        assert_eq!(json, "3");
        let back: Junction = serde_json::from_str("1").unwrap();
        assert_eq!(back, Junction::Right);
    }
}
