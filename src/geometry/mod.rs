//! Junction geometry, direction classification and orthogonal routing
//!
//! Everything in this module is pure: junctions and routes are recomputed
//! from the boxes passed in, never cached across shape mutations.

pub mod direction;
pub mod junction;
pub mod route;
pub mod types;

pub use direction::Direction;
pub use junction::{junction_point, junctions};
pub use route::{connector_path, dangling_stub, route, route_free};
pub use types::{BoundingBox, Junction, Point};
