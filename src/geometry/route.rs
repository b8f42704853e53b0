//! Orthogonal connector routing
//!
//! Anchored paths come from a hand-derived table keyed by
//! `(source junction, target junction, direction)`. Every path leaves its
//! junction perpendicular to the shape edge by a fixed standoff distance
//! before turning, so segments stay clear of the shape bodies. Free-ended
//! paths (a connector still tracking the pointer) use a single L-bend.
//!
//! Routing is a pure function of the boxes it is given: no caching, no
//! incremental state, safe to call on every render frame.

use tracing::debug;

use crate::config::EngineConfig;
use crate::document::{Connector, ConnectorEnd, Document};

use super::direction::Direction;
use super::junction::junction_point;
use super::types::{BoundingBox, Junction, Point};

/// Route an anchored connector between two layout boxes.
///
/// Returns at least two waypoints. Consecutive waypoints differ on exactly
/// one axis; a diagonal segment is never produced. Directly facing junction
/// pairs that are already aligned on the orthogonal coordinate collapse to a
/// single straight segment.
///
/// The two `(source, target, direction)` combinations the table never mapped
/// fall back to a direct orthogonal connection and are logged as routing
/// gaps; the fallback can cross a shape body but must never fail the render.
pub fn route(
    source_junction: Junction,
    source_bounds: &BoundingBox,
    target_junction: Junction,
    target_bounds: &BoundingBox,
    direction: Direction,
    standoff: f64,
) -> Vec<Point> {
    let s = junction_point(source_bounds, source_junction);
    let t = junction_point(target_bounds, target_junction);

    if let Some(path) = facing_straight(source_junction, target_junction, s, t) {
        return path;
    }

    let mut points = vec![s];
    match table_waypoints(
        source_junction,
        target_junction,
        direction,
        s,
        t,
        target_bounds,
        standoff,
    ) {
        Some(mids) => points.extend(mids),
        None => {
            debug!(
                source = source_junction.index(),
                target = target_junction.index(),
                direction = direction.code(),
                "routing table gap, falling back to direct connection"
            );
            if s.x != t.x && s.y != t.y {
                points.push(Point::new(s.x, t.y));
            }
        }
    }
    points.push(t);

    let mut points = collapse_duplicates(points);
    if points.len() == 1 {
        // Fully degenerate geometry (both junctions coincide): keep the
        // length >= 2 contract.
        points.push(t);
    }
    points
}

/// Route a drafting connector whose far end follows the pointer.
///
/// The path is the straight `[source, pointer]` segment, with one bend at
/// `(source.x, pointer.y)` inserted only when both axis deltas exceed the
/// bend epsilon. A long diagonal is never emitted.
pub fn route_free(source: Point, pointer: Point, bend_epsilon: f64) -> Vec<Point> {
    let dx = (pointer.x - source.x).abs();
    let dy = (pointer.y - source.y).abs();
    if dx > bend_epsilon && dy > bend_epsilon {
        vec![source, Point::new(source.x, pointer.y), pointer]
    } else {
        vec![source, pointer]
    }
}

/// The short dangling segment drawn for a connector end whose opposite
/// anchor no longer resolves to a shape: the junction point extended by the
/// standoff along its outward normal.
pub fn dangling_stub(bounds: &BoundingBox, junction: Junction, standoff: f64) -> Vec<Point> {
    let p = junction_point(bounds, junction);
    let (nx, ny) = junction.outward();
    vec![p, Point::new(p.x + nx * standoff, p.y + ny * standoff)]
}

/// Resolve a connector against the current document and route it.
///
/// Anchors referencing a missing shape are treated as unresolved: the path
/// degrades to the dangling stub at whichever end still resolves. Returns
/// `None` when nothing can be drawn at all. Never panics: a deleted shape
/// must not take the render down with it.
pub fn connector_path(
    document: &Document,
    connector: &Connector,
    config: &EngineConfig,
) -> Option<Vec<Point>> {
    let source_bounds = document.bounding_box(&connector.source.shape_id);
    match &connector.target {
        ConnectorEnd::Free(pointer) => {
            let bounds = source_bounds?;
            let source = junction_point(&bounds, connector.source.junction);
            Some(route_free(source, *pointer, config.bend_epsilon))
        }
        ConnectorEnd::Anchor(anchor) => {
            let target_bounds = document.bounding_box(&anchor.shape_id);
            match (source_bounds, target_bounds) {
                (Some(sb), Some(tb)) => {
                    let s = junction_point(&sb, connector.source.junction);
                    let t = junction_point(&tb, anchor.junction);
                    let direction = Direction::classify(s, t);
                    Some(route(
                        connector.source.junction,
                        &sb,
                        anchor.junction,
                        &tb,
                        direction,
                        config.standoff,
                    ))
                }
                (Some(sb), None) => {
                    debug!(connector = %connector.id, shape = %anchor.shape_id, "target anchor unresolved");
                    Some(dangling_stub(&sb, connector.source.junction, config.standoff))
                }
                (None, Some(tb)) => {
                    debug!(connector = %connector.id, shape = %connector.source.shape_id, "source anchor unresolved");
                    Some(dangling_stub(&tb, anchor.junction, config.standoff))
                }
                (None, None) => None,
            }
        }
    }
}

/// Directly facing junction pairs that are aligned on the orthogonal axis
/// degenerate to a single straight segment with no standoff.
fn facing_straight(source: Junction, target: Junction, s: Point, t: Point) -> Option<Vec<Point>> {
    let aligned = match (source, target) {
        (Junction::Right, Junction::Left) => s.y == t.y && t.x > s.x,
        (Junction::Left, Junction::Right) => s.y == t.y && t.x < s.x,
        (Junction::Bottom, Junction::Top) => s.x == t.x && t.y > s.y,
        (Junction::Top, Junction::Bottom) => s.x == t.x && t.y < s.y,
        _ => false,
    };
    aligned.then(|| vec![s, t])
}

/// Intermediate waypoints of the routing table, or `None` for the entries
/// the table never mapped.
///
/// Swing-around clearances are measured from the target box's scaled
/// dimensions.
fn table_waypoints(
    source: Junction,
    target: Junction,
    direction: Direction,
    s: Point,
    t: Point,
    target_bounds: &BoundingBox,
    off: f64,
) -> Option<Vec<Point>> {
    use Direction::{BottomLeft, BottomRight, TopLeft, TopRight};
    use Junction::{Bottom, Left, Right, Top};

    let (sx, sy) = (s.x, s.y);
    let (tx, ty) = (t.x, t.y);
    let tw = target_bounds.scaled_width();
    let th = target_bounds.scaled_height();
    let pt = Point::new;

    let mids = match (source, target) {
        (Top, Top) => match direction {
            BottomRight | BottomLeft => vec![pt(sx, ty - off), pt(tx, ty - off)],
            TopLeft | TopRight => vec![pt(sx, sy - off), pt(tx, sy - off)],
        },
        (Top, Right) => match direction {
            TopRight => vec![
                pt(sx, sy - off),
                pt(sx - off - tw / 2.0, sy - off),
                pt(sx - off - tw / 2.0, ty),
            ],
            BottomRight => vec![pt(sx, ty)],
            BottomLeft => vec![
                pt(sx, ty - off - th / 2.0),
                pt(tx + off, ty - off - th / 2.0),
                pt(tx + off, ty),
            ],
            TopLeft => vec![pt(sx, sy - off), pt(tx + off, sy - off), pt(tx + off, ty)],
        },
        (Top, Bottom) => match direction {
            BottomRight | BottomLeft => vec![pt(sx, sy - off), pt(tx, sy - off)],
            TopLeft => vec![
                pt(sx, sy - off),
                pt(sx + tw / 2.0 + off, sy - off),
                pt(sx + tw / 2.0 + off, ty + off),
                pt(tx, ty + off),
            ],
            TopRight => vec![
                pt(sx, sy - off),
                pt(sx - tw / 2.0 - off, sy - off),
                pt(sx - tw / 2.0 - off, ty + off),
                pt(tx, ty + off),
            ],
        },
        (Top, Left) => match direction {
            BottomLeft => vec![pt(sx, ty)],
            BottomRight => vec![
                pt(sx, sy - off),
                pt(sx - tw / 2.0 - off, sy - off),
                pt(sx - tw / 2.0 - off, sy - off + th / 2.0),
                pt(tx - off, sy - off + th / 2.0),
                pt(tx - off, ty),
            ],
            TopLeft | TopRight => {
                vec![pt(sx, sy - off), pt(tx - off, sy - off), pt(tx - off, ty)]
            }
        },
        (Right, Top) => match direction {
            TopLeft => vec![pt(tx, sy), pt(tx, ty - off)],
            TopRight | BottomRight | BottomLeft => {
                vec![pt(sx + off, sy), pt(sx + off, ty - off), pt(tx, ty - off)]
            }
        },
        (Right, Right) => match direction {
            TopLeft | BottomLeft => vec![pt(tx + off, sy), pt(tx + off, ty)],
            TopRight | BottomRight => vec![pt(sx + off, sy), pt(sx + off, ty)],
        },
        (Right, Bottom) => match direction {
            BottomLeft => vec![pt(tx, sy)],
            BottomRight => {
                // Pick the lane under or over the target body depending on
                // how far below it the source sits.
                let lane = if sy - ty <= th {
                    sy + th / 2.0 + off
                } else {
                    sy - th / 2.0 - off
                };
                vec![pt(sx + off, sy), pt(sx + off, lane), pt(tx, lane)]
            }
            TopLeft | TopRight => return None,
        },
        (Right, Left) => match direction {
            TopLeft | BottomLeft => vec![pt(sx + off, sy), pt(sx + off, ty)],
            BottomRight => {
                let lane = if sy - ty <= th {
                    sy + th / 2.0 + off
                } else {
                    sy - th / 2.0 - off
                };
                vec![
                    pt(sx + off, sy),
                    pt(sx + off, lane),
                    pt(tx - off, lane),
                    pt(tx - off, ty),
                ]
            }
            TopRight => {
                let lane = sy - th / 2.0 - off;
                vec![
                    pt(sx + off, sy),
                    pt(sx + off, lane),
                    pt(tx - off, lane),
                    pt(tx - off, ty),
                ]
            }
        },
        (Bottom, Top) => match direction {
            TopLeft | TopRight => vec![pt(sx, ty - off), pt(tx, ty - off)],
            BottomRight => vec![
                pt(sx, sy + off),
                pt(sx - th / 2.0 - off, sy + off),
                pt(sx - th / 2.0 - off, ty - off),
                pt(tx, ty - off),
            ],
            BottomLeft => vec![
                pt(sx, sy + off),
                pt(sx + th / 2.0 + off, sy + off),
                pt(sx + th / 2.0 + off, ty - off),
                pt(tx, ty - off),
            ],
        },
        (Bottom, Right) => vec![pt(sx, sy + off), pt(tx + off, sy + off), pt(tx + off, ty)],
        (Bottom, Bottom) => match direction {
            TopLeft | TopRight => vec![pt(sx, ty + off), pt(tx, ty + off)],
            BottomRight | BottomLeft => vec![pt(sx, sy + off), pt(tx, sy + off)],
        },
        (Bottom, Left) => match direction {
            BottomLeft => vec![
                pt(sx, sy + off),
                pt(sx + tw / 2.0 + off, sy + off),
                pt(sx + tw / 2.0 + off, ty),
            ],
            TopLeft => vec![pt(sx, ty)],
            TopRight | BottomRight => {
                vec![pt(sx, sy + off), pt(tx - off, sy + off), pt(tx - off, ty)]
            }
        },
        (Left, Top) => vec![pt(sx - off, sy), pt(sx - off, ty - off), pt(tx, ty - off)],
        (Left, Right) => match direction {
            TopLeft | BottomLeft => vec![
                pt(sx - off, sy),
                pt(sx - off, ty - off - th / 2.0),
                pt(tx + off, ty - off - th / 2.0),
                pt(tx + off, ty),
            ],
            TopRight | BottomRight => vec![pt(tx + off, sy), pt(tx + off, ty)],
        },
        (Left, Bottom) => match direction {
            BottomLeft => vec![
                pt(sx - off, sy),
                pt(sx - off, sy - th / 2.0 - off),
                pt(tx, sy - th / 2.0 - off),
            ],
            BottomRight => vec![pt(tx, sy)],
            TopLeft | TopRight => vec![pt(sx - off, sy), pt(sx - off, ty + off), pt(tx, ty + off)],
        },
        (Left, Left) => match direction {
            TopLeft | BottomLeft => vec![pt(sx - off, sy), pt(sx - off, ty)],
            TopRight | BottomRight => vec![pt(tx - off, sy), pt(tx - off, ty)],
        },
    };
    Some(mids)
}

/// Degenerate geometry can make neighbouring table waypoints coincide; drop
/// the zero-length segments so every emitted segment moves on exactly one
/// axis.
fn collapse_duplicates(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Anchor, DocumentPatch, Shape};

    fn boxes(dx: f64, dy: f64) -> (BoundingBox, BoundingBox) {
        (
            BoundingBox::new(0.0, 0.0, 100.0, 100.0),
            BoundingBox::new(dx, dy, 100.0, 100.0),
        )
    }

    fn assert_orthogonal(path: &[Point]) {
        assert!(path.len() >= 2, "path too short: {:?}", path);
        for pair in path.windows(2) {
            let dx = pair[1].x - pair[0].x;
            let dy = pair[1].y - pair[0].y;
            assert!(
                (dx != 0.0) ^ (dy != 0.0),
                "segment {:?} -> {:?} is not orthogonal",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_facing_horizontal_pair_is_straight() {
        let (a, b) = boxes(300.0, 0.0);
        let path = route(
            Junction::Right,
            &a,
            Junction::Left,
            &b,
            Direction::TopLeft,
            20.0,
        );
        assert_eq!(path, vec![Point::new(100.0, 50.0), Point::new(300.0, 50.0)]);
    }

    #[test]
    fn test_facing_vertical_pair_is_straight() {
        let (a, b) = boxes(0.0, 300.0);
        let path = route(
            Junction::Bottom,
            &a,
            Junction::Top,
            &b,
            Direction::TopLeft,
            20.0,
        );
        assert_eq!(path, vec![Point::new(50.0, 100.0), Point::new(50.0, 300.0)]);
    }

    #[test]
    fn test_misaligned_facing_pair_uses_table() {
        let (a, b) = boxes(300.0, 40.0);
        let s = Point::new(100.0, 50.0);
        let t = Point::new(300.0, 90.0);
        let path = route(
            Junction::Right,
            &a,
            Junction::Left,
            &b,
            Direction::classify(s, t),
            20.0,
        );
        assert!(path.len() > 2);
        assert_eq!(path[0], s);
        assert_eq!(*path.last().unwrap(), t);
        assert_orthogonal(&path);
    }

    #[test]
    fn test_path_leaves_source_by_standoff() {
        // Top-to-top pair far apart: the first segment must step the full
        // standoff away from the source edge before turning.
        let (a, b) = boxes(300.0, 300.0);
        let path = route(
            Junction::Top,
            &a,
            Junction::Top,
            &b,
            Direction::TopLeft,
            20.0,
        );
        assert_eq!(path[0], Point::new(50.0, 0.0));
        assert_eq!(path[1], Point::new(50.0, -20.0));
        assert_orthogonal(&path);
    }

    #[test]
    fn test_unmapped_entry_falls_back_orthogonally() {
        // Right -> Bottom with the source above-left of the target is one of
        // the two entries the table never mapped.
        let (a, b) = boxes(300.0, 300.0);
        let s = Point::new(100.0, 50.0);
        let t = Point::new(350.0, 400.0);
        let direction = Direction::classify(s, t);
        assert_eq!(direction, Direction::TopLeft);
        let path = route(Junction::Right, &a, Junction::Bottom, &b, direction, 20.0);
        assert_eq!(path, vec![s, Point::new(100.0, 400.0), t]);
    }

    #[test]
    fn test_route_is_orthogonal_for_all_combinations() {
        let offsets = [-250.0, 0.0, 250.0];
        for dx in offsets {
            for dy in offsets {
                let (a, b) = boxes(dx, dy);
                for source in Junction::ALL {
                    for target in Junction::ALL {
                        let s = junction_point(&a, source);
                        let t = junction_point(&b, target);
                        let direction = Direction::classify(s, t);
                        let path = route(source, &a, target, &b, direction, 20.0);
                        assert_eq!(path[0], s);
                        assert_eq!(*path.last().unwrap(), t);
                        assert_orthogonal(&path);
                    }
                }
            }
        }
    }

    #[test]
    fn test_route_is_idempotent() {
        let (a, b) = boxes(180.0, -120.0);
        let first = route(
            Junction::Left,
            &a,
            Junction::Bottom,
            &b,
            Direction::BottomLeft,
            20.0,
        );
        let second = route(
            Junction::Left,
            &a,
            Junction::Bottom,
            &b,
            Direction::BottomLeft,
            20.0,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_route_free_inserts_single_bend() {
        let path = route_free(Point::new(50.0, 0.0), Point::new(200.0, 150.0), 8.0);
        assert_eq!(
            path,
            vec![
                Point::new(50.0, 0.0),
                Point::new(50.0, 150.0),
                Point::new(200.0, 150.0)
            ]
        );
    }

    #[test]
    fn test_route_free_stays_direct_below_epsilon() {
        // Vertical delta under the epsilon: no bend point.
        let path = route_free(Point::new(50.0, 0.0), Point::new(200.0, 5.0), 8.0);
        assert_eq!(path, vec![Point::new(50.0, 0.0), Point::new(200.0, 5.0)]);
    }

    #[test]
    fn test_connector_path_degrades_to_stub_when_target_missing() {
        let config = EngineConfig::default();
        let document = Document::new()
            .apply(&DocumentPatch::AddShape(Shape::new(
                "a", 0.0, 0.0, 100.0, 100.0,
            )))
            .unwrap();
        let connector = Connector {
            id: "c1".to_string(),
            source: Anchor::new("a", Junction::Right),
            target: ConnectorEnd::Anchor(Anchor::new("gone", Junction::Left)),
            state: crate::document::ConnectorState::Finished,
            selected: false,
        };
        let path = connector_path(&document, &connector, &config).unwrap();
        assert_eq!(path, vec![Point::new(100.0, 50.0), Point::new(120.0, 50.0)]);
    }

    #[test]
    fn test_connector_path_none_when_nothing_resolves() {
        let config = EngineConfig::default();
        let document = Document::new();
        let connector = Connector {
            id: "c1".to_string(),
            source: Anchor::new("gone", Junction::Right),
            target: ConnectorEnd::Anchor(Anchor::new("also-gone", Junction::Left)),
            state: crate::document::ConnectorState::Finished,
            selected: false,
        };
        assert_eq!(connector_path(&document, &connector, &config), None);
    }
}
