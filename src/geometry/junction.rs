//! Junction provider: the four cardinal connection points of a layout box
//!
//! The formula is uniform across every shape kind. Circles, rhombi and
//! swimlanes all expose the same four edge midpoints of their bounding box,
//! which keeps connector endpoints stable while a shape is resized or its
//! kind is swapped.

use super::types::{BoundingBox, Junction, Point};

/// Compute the four junction points of a box, in index order
/// (top, right, bottom, left).
///
/// Pure and total: no shape lookup, no caching. Callers re-invoke this on
/// every render frame with the current box.
pub fn junctions(bounds: &BoundingBox) -> [Point; 4] {
    let rw = bounds.scaled_width();
    let rh = bounds.scaled_height();
    [
        Point::new(bounds.x + rw / 2.0, bounds.y),
        Point::new(bounds.x + rw, bounds.y + rh / 2.0),
        Point::new(bounds.x + rw / 2.0, bounds.y + rh),
        Point::new(bounds.x, bounds.y + rh / 2.0),
    ]
}

/// Compute a single junction point of a box
pub fn junction_point(bounds: &BoundingBox, junction: Junction) -> Point {
    junctions(bounds)[junction.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_junctions_unit_scale() {
        let bounds = BoundingBox::new(10.0, 20.0, 100.0, 60.0);
        let points = junctions(&bounds);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Point::new(60.0, 20.0));
        assert_eq!(points[1], Point::new(110.0, 50.0));
        assert_eq!(points[2], Point::new(60.0, 80.0));
        assert_eq!(points[3], Point::new(10.0, 50.0));
    }

    #[test]
    fn test_junctions_midpoint_property() {
        let bounds = BoundingBox::new(5.0, 7.0, 80.0, 30.0);
        let points = junctions(&bounds);
        // Top/bottom share the horizontal midpoint, left/right the vertical.
        assert_eq!(points[0].x, 5.0 + 80.0 / 2.0);
        assert_eq!(points[2].x, 5.0 + 80.0 / 2.0);
        assert_eq!(points[1].y, 7.0 + 30.0 / 2.0);
        assert_eq!(points[3].y, 7.0 + 30.0 / 2.0);
    }

    #[test]
    fn test_junctions_apply_live_scale() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 100.0).with_scale(2.0, 0.5);
        let points = junctions(&bounds);
        assert_eq!(points[0], Point::new(100.0, 0.0));
        assert_eq!(points[1], Point::new(200.0, 25.0));
        assert_eq!(points[2], Point::new(100.0, 50.0));
        assert_eq!(points[3], Point::new(0.0, 25.0));
    }

    #[test]
    fn test_junction_point_matches_index() {
        let bounds = BoundingBox::new(0.0, 0.0, 40.0, 40.0);
        let all = junctions(&bounds);
        for junction in Junction::ALL {
            assert_eq!(junction_point(&bounds, junction), all[junction.index()]);
        }
    }
}
