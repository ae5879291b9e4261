//! Rendering surface capability.
//!
//! The ruler never touches a page directly. Everything it draws, every
//! listener it registers and every artifact it removes goes through the
//! [`Surface`] trait, so the controller logic runs the same against a real
//! page binding or against [`RecordingSurface`] in tests.
//!
//! # Module Structure
//!
//! - [`node`]: node handles and node descriptions
//! - [`recording`]: in-memory surface that records every mutation

pub mod node;
pub mod recording;

pub use node::{ListenerId, NodeId, NodeSpec};
pub use recording::{Mutation, RecordedNode, RecordingSurface};

use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;

/// Kinds of page signals the ruler can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalKind {
    PointerMove,
    Scroll,
    Resize,
}

/// A signal delivered by the host for a subscribed [`SignalKind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "camelCase")]
pub enum Signal {
    /// Pointer moved; `y` is the viewport-relative vertical position.
    PointerMove { y: f64 },
    Scroll,
    Resize,
}

impl Signal {
    /// The subscription kind this signal is delivered under.
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::PointerMove { .. } => SignalKind::PointerMove,
            Signal::Scroll => SignalKind::Scroll,
            Signal::Resize => SignalKind::Resize,
        }
    }
}

/// Capability interface over the page the ruler decorates.
///
/// Implementations are driven from a single thread; nothing here blocks.
pub trait Surface {
    // === Nodes ===

    /// Append a node to the page and return its handle.
    fn append_node(&mut self, spec: NodeSpec) -> NodeId;

    /// Remove a node. Returns `false` if it was already gone.
    fn remove_node(&mut self, node: NodeId) -> bool;

    /// Set one inline style property. Returns `false` for unknown nodes.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> bool;

    /// Whether `node` is still attached to the page.
    fn contains(&self, node: NodeId) -> bool;

    // === Signals ===

    /// Register a listener for `kind`.
    fn subscribe(&mut self, kind: SignalKind) -> ListenerId;

    /// Remove a listener. Returns `false` if it was not registered.
    fn unsubscribe(&mut self, listener: ListenerId) -> bool;

    // === Restoration queries ===

    /// Every `<style>` node on the page with its text content.
    fn stylesheets(&self) -> Vec<(NodeId, String)>;

    /// Look up a node by its DOM id.
    fn find_by_dom_id(&self, dom_id: &str) -> Option<NodeId>;

    /// Nodes whose inline style attribute contains `needle`.
    fn nodes_with_inline_style_containing(&self, needle: &str) -> Vec<NodeId>;

    /// Clear `properties` from the inline style of every node matching one
    /// of `selectors`, skipping `exclude`. Returns the number of nodes
    /// touched.
    fn clear_inline_styles(
        &mut self,
        selectors: &[&str],
        properties: &[&str],
        exclude: &[NodeId],
    ) -> Result<usize, SurfaceError>;

    /// Reload the page, discarding all runtime modifications.
    fn reload(&mut self) -> Result<(), SurfaceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_kind_mapping() {
        assert_eq!(Signal::PointerMove { y: 1.0 }.kind(), SignalKind::PointerMove);
        assert_eq!(Signal::Scroll.kind(), SignalKind::Scroll);
        assert_eq!(Signal::Resize.kind(), SignalKind::Resize);
    }

    #[test]
    fn test_signal_wire_format() {
        let s: Signal = serde_json::from_str(r#"{"signal":"pointerMove","y":12.5}"#).unwrap();
        assert_eq!(s, Signal::PointerMove { y: 12.5 });
        let s: Signal = serde_json::from_str(r#"{"signal":"resize"}"#).unwrap();
        assert_eq!(s, Signal::Resize);
    }
}
