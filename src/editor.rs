//! The connector gesture state machine
//!
//! Pointer events arrive already hit-tested by the host renderer as a
//! [`PointerTarget`], in down -> move* -> up order (zero moves is a valid
//! gesture). The editor turns them into document patches: starting a draft
//! on a junction press, tracking the pointer with the draft's free end,
//! capturing a target anchor, and resolving the draft on release to either a
//! finished connector or nothing.
//!
//! At most one connector is ever drafting. The active draft is an explicit
//! reference held here, not a predicate over the collection, so a capture
//! event can never leak onto a stale draft.

use tracing::{debug, trace};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::document::{
    Anchor, Connector, ConnectorEnd, ConnectorPatch, ConnectorState, Document, DocumentError,
    DocumentPatch, ShapePatch,
};
use crate::geometry::{self, junction_point, Junction, Point};

/// What the host's hit-test resolved a pointer event to
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// One of the four junction markers shown on shape hover
    JunctionMarker { shape_id: String, junction: Junction },
    /// The body of an existing connector
    ConnectorBody { connector_id: String },
    /// The body of a shape
    ShapeBody { shape_id: String },
    /// Empty canvas
    Canvas,
}

impl PointerTarget {
    pub fn junction(shape_id: impl Into<String>, junction: Junction) -> Self {
        PointerTarget::JunctionMarker {
            shape_id: shape_id.into(),
            junction,
        }
    }

    pub fn connector(connector_id: impl Into<String>) -> Self {
        PointerTarget::ConnectorBody {
            connector_id: connector_id.into(),
        }
    }

    pub fn shape(shape_id: impl Into<String>) -> Self {
        PointerTarget::ShapeBody {
            shape_id: shape_id.into(),
        }
    }
}

/// The interactive editor: a document snapshot plus the gesture state driving
/// connector drafting.
///
/// All transitions are synchronous and local; the only failures are
/// validation guards (self-loops, accidental clicks) that silently discard
/// the candidate connector.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    config: EngineConfig,
    active_draft: Option<String>,
}

impl Editor {
    pub fn new(document: Document, config: EngineConfig) -> Self {
        Self {
            document,
            config,
            active_draft: None,
        }
    }

    /// The current document snapshot
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Id of the connector currently being drafted, if any
    pub fn active_draft(&self) -> Option<&str> {
        self.active_draft.as_deref()
    }

    /// Pointer pressed at `position` over `target`
    pub fn pointer_down(&mut self, position: Point, target: PointerTarget) {
        match target {
            PointerTarget::JunctionMarker { shape_id, junction } => {
                if self.active_draft.is_some() {
                    self.capture_target(shape_id, junction);
                } else {
                    self.start_draft(shape_id, junction, position);
                }
            }
            PointerTarget::ConnectorBody { connector_id } => {
                self.reopen_connector(connector_id, position);
            }
            PointerTarget::ShapeBody { shape_id } => {
                self.apply(DocumentPatch::UpdateShape {
                    id: shape_id,
                    patch: ShapePatch::new().with_selected(true),
                });
            }
            PointerTarget::Canvas => {
                self.apply(DocumentPatch::ClearSelection);
            }
        }
    }

    /// Pointer moved to `position`.
    ///
    /// Only the active draft's free end follows the pointer; once a target
    /// anchor is captured, later moves no longer touch it.
    pub fn pointer_move(&mut self, position: Point) {
        let Some(draft_id) = self.active_draft.clone() else {
            return;
        };
        let Some(connector) = self.document.connector(&draft_id) else {
            // The draft vanished mid-gesture (e.g. deleted by the host).
            self.active_draft = None;
            return;
        };
        if !connector.target.is_free() {
            return;
        }
        self.apply(DocumentPatch::UpdateConnector {
            id: draft_id,
            patch: ConnectorPatch::new().with_target(ConnectorEnd::Free(position)),
        });
    }

    /// Pointer released at `position` over `target`.
    ///
    /// A release over a junction marker captures it as the target first;
    /// then the active draft resolves to `Finished` or is discarded.
    pub fn pointer_up(&mut self, position: Point, target: PointerTarget) {
        if let PointerTarget::JunctionMarker { shape_id, junction } = target {
            if self.active_draft.is_some() {
                self.capture_target(shape_id, junction);
            }
        }
        self.resolve_draft(position);
    }

    /// Merge-patch a shape on behalf of the host (drag, resize, rotate,
    /// select). Selection exclusivity and min-size clamping are enforced by
    /// the reducer.
    pub fn apply_shape_patch(
        &mut self,
        shape_id: &str,
        patch: ShapePatch,
    ) -> Result<(), DocumentError> {
        self.document = self.document.apply(&DocumentPatch::UpdateShape {
            id: shape_id.to_string(),
            patch,
        })?;
        Ok(())
    }

    /// Remove every selected shape and connector (the delete gesture).
    ///
    /// Connectors anchored to a removed shape are left in place and degrade
    /// to dangling stubs when routed.
    pub fn delete_selected(&mut self) {
        self.apply(DocumentPatch::RemoveSelected);
    }

    /// Route a connector against the current document. Safe to call on every
    /// render frame.
    pub fn connector_path(&self, connector_id: &str) -> Option<Vec<Point>> {
        let connector = self.document.connector(connector_id)?;
        geometry::connector_path(&self.document, connector, &self.config)
    }

    /// Junction marker positions for a shape, for the hover overlay
    pub fn shape_junctions(&self, shape_id: &str) -> Option<[Point; 4]> {
        self.document
            .bounding_box(shape_id)
            .map(|bounds| geometry::junctions(&bounds))
    }

    fn start_draft(&mut self, shape_id: String, junction: Junction, pointer: Point) {
        if self.document.shape(&shape_id).is_none() {
            debug!(shape = %shape_id, "ignoring draft start on missing shape");
            return;
        }
        let id = Uuid::new_v4().to_string();
        trace!(connector = %id, shape = %shape_id, "draft started");
        self.apply(DocumentPatch::AddConnector(Connector::draft(
            id.clone(),
            Anchor::new(shape_id, junction),
            pointer,
        )));
        self.active_draft = Some(id);
    }

    fn capture_target(&mut self, shape_id: String, junction: Junction) {
        let Some(draft_id) = self.active_draft.clone() else {
            return;
        };
        trace!(connector = %draft_id, shape = %shape_id, "target captured");
        self.apply(DocumentPatch::UpdateConnector {
            id: draft_id,
            patch: ConnectorPatch::new()
                .with_target(ConnectorEnd::Anchor(Anchor::new(shape_id, junction))),
        });
    }

    fn reopen_connector(&mut self, connector_id: String, pointer: Point) {
        if self.active_draft.is_some() {
            debug!(connector = %connector_id, "ignoring connector press while a draft is active");
            return;
        }
        let Some(connector) = self.document.connector(&connector_id) else {
            debug!(connector = %connector_id, "ignoring press on missing connector");
            return;
        };
        if connector.state != ConnectorState::Finished {
            return;
        }
        trace!(connector = %connector_id, "re-opened for re-targeting");
        self.apply(DocumentPatch::UpdateConnector {
            id: connector_id.clone(),
            patch: ConnectorPatch::new()
                .with_state(ConnectorState::Drafting)
                .with_target(ConnectorEnd::Free(pointer))
                .with_selected(true),
        });
        self.active_draft = Some(connector_id);
    }

    /// Resolve the active draft on pointer release.
    ///
    /// Anchored to another shape -> finished. Anchored to its own source
    /// shape -> discarded (self-loop). Still free -> discarded when the
    /// displacement from the source junction is within the click slop,
    /// otherwise kept as a finished free-floating connector at the release
    /// point.
    fn resolve_draft(&mut self, release: Point) {
        let Some(draft_id) = self.active_draft.take() else {
            return;
        };
        let Some(connector) = self.document.connector(&draft_id).cloned() else {
            return;
        };
        match &connector.target {
            ConnectorEnd::Anchor(anchor) => {
                if anchor.shape_id == connector.source.shape_id {
                    trace!(connector = %draft_id, "self-loop discarded");
                    self.apply(DocumentPatch::RemoveConnector { id: draft_id });
                } else {
                    trace!(connector = %draft_id, "draft finished on anchor");
                    self.apply(DocumentPatch::UpdateConnector {
                        id: draft_id,
                        patch: ConnectorPatch::new().with_state(ConnectorState::Finished),
                    });
                }
            }
            ConnectorEnd::Free(_) => {
                let source_point = self
                    .document
                    .bounding_box(&connector.source.shape_id)
                    .map(|bounds| junction_point(&bounds, connector.source.junction));
                match source_point {
                    None => {
                        trace!(connector = %draft_id, "source vanished, draft discarded");
                        self.apply(DocumentPatch::RemoveConnector { id: draft_id });
                    }
                    Some(source) if source.distance_to(release) < self.config.click_slop => {
                        trace!(connector = %draft_id, "accidental click discarded");
                        self.apply(DocumentPatch::RemoveConnector { id: draft_id });
                    }
                    Some(_) => {
                        trace!(connector = %draft_id, "draft finished free-floating");
                        self.apply(DocumentPatch::UpdateConnector {
                            id: draft_id,
                            patch: ConnectorPatch::new()
                                .with_target(ConnectorEnd::Free(release))
                                .with_state(ConnectorState::Finished),
                        });
                    }
                }
            }
        }
    }

    fn apply(&mut self, patch: DocumentPatch) {
        match self.document.apply(&patch) {
            Ok(next) => self.document = next,
            Err(err) => debug!(error = %err, "dropping stale document patch"),
        }
    }
}
