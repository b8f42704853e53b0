//! Connector records: anchors, free ends and their merge-patches

use serde::{Deserialize, Serialize};

use crate::geometry::{Junction, Point};

/// A reference pairing a shape with one of its four junctions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub shape_id: String,
    pub junction: Junction,
}

impl Anchor {
    pub fn new(shape_id: impl Into<String>, junction: Junction) -> Self {
        Self {
            shape_id: shape_id.into(),
            junction,
        }
    }
}

/// The far end of a connector: bound to a junction, or a loose point that
/// tracked the pointer while drafting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConnectorEnd {
    Anchor(Anchor),
    Free(Point),
}

impl ConnectorEnd {
    /// The bound anchor, if any
    pub fn as_anchor(&self) -> Option<&Anchor> {
        match self {
            ConnectorEnd::Anchor(anchor) => Some(anchor),
            ConnectorEnd::Free(_) => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, ConnectorEnd::Free(_))
    }
}

/// Lifecycle state of a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorState {
    /// Far end still tracks the pointer (or a captured, unconfirmed anchor)
    Drafting,
    /// Committed to the document
    Finished,
}

/// An orthogonal connector between a source junction and a target end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub source: Anchor,
    pub target: ConnectorEnd,
    pub state: ConnectorState,
    #[serde(default)]
    pub selected: bool,
}

impl Connector {
    /// Create a new drafting connector whose free end starts at the pointer
    pub fn draft(id: impl Into<String>, source: Anchor, pointer: Point) -> Self {
        Self {
            id: id.into(),
            source,
            target: ConnectorEnd::Free(pointer),
            state: ConnectorState::Drafting,
            selected: false,
        }
    }

    pub fn is_drafting(&self) -> bool {
        self.state == ConnectorState::Drafting
    }
}

/// A merge-patch for a connector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ConnectorEnd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ConnectorState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl ConnectorPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the target end
    pub fn with_target(mut self, target: ConnectorEnd) -> Self {
        self.target = Some(target);
        self
    }

    /// Transition the lifecycle state
    pub fn with_state(mut self, state: ConnectorState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set or clear the selection flag
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }

    /// Merge this patch into a connector
    pub(crate) fn apply_to(&self, connector: &mut Connector) {
        if let Some(target) = &self.target {
            connector.target = target.clone();
        }
        if let Some(state) = self.state {
            connector.state = state;
        }
        if let Some(selected) = self.selected {
            connector.selected = selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_starts_free_and_unselected() {
        let connector = Connector::draft(
            "c1",
            Anchor::new("a", Junction::Top),
            Point::new(10.0, 20.0),
        );
        assert!(connector.is_drafting());
        assert!(!connector.selected);
        assert!(connector.target.is_free());
    }

    #[test]
    fn test_patch_binds_anchor_target() {
        let mut connector = Connector::draft(
            "c1",
            Anchor::new("a", Junction::Top),
            Point::new(10.0, 20.0),
        );
        ConnectorPatch::new()
            .with_target(ConnectorEnd::Anchor(Anchor::new("b", Junction::Left)))
            .apply_to(&mut connector);
        assert_eq!(
            connector.target.as_anchor(),
            Some(&Anchor::new("b", Junction::Left))
        );
        // Binding a target does not finish the connector by itself.
        assert!(connector.is_drafting());
    }

    #[test]
    fn test_connector_end_serde_shapes() {
        let anchored = ConnectorEnd::Anchor(Anchor::new("b", Junction::Left));
        let json = serde_json::to_string(&anchored).unwrap();
        assert_eq!(json, r#"{"shape_id":"b","junction":3}"#);

        let free = ConnectorEnd::Free(Point::new(1.5, 2.5));
        let json = serde_json::to_string(&free).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":2.5}"#);

        let back: ConnectorEnd = serde_json::from_str(r#"{"shape_id":"b","junction":3}"#).unwrap();
        assert_eq!(back, anchored);
        let back: ConnectorEnd = serde_json::from_str(r#"{"x":1.5,"y":2.5}"#).unwrap();
        assert_eq!(back, free);
    }
}
