//! In-memory surface that records every mutation.
//!
//! Used by the test suite and the headless harness. Nodes come from three
//! places:
//!
//! - page nodes ([`RecordingSurface::insert_page_node`]): the page as it was
//!   served; they survive a reload with their original styles
//! - injected nodes ([`RecordingSurface::inject_node`]): runtime additions by
//!   other features (reading mode); a reload drops them
//! - ruler nodes ([`Surface::append_node`]): logged as [`Mutation`]s and
//!   dropped by a reload

use std::collections::BTreeMap;

use tracing::trace;

use super::node::{set_style_entry, ListenerId, NodeId, NodeSpec};
use super::{SignalKind, Surface};
use crate::error::SurfaceError;

/// A mutation performed through the [`Surface`] trait.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Append(NodeId),
    Remove(NodeId),
    SetStyle {
        node: NodeId,
        property: String,
        value: String,
    },
    Subscribe(ListenerId, SignalKind),
    Unsubscribe(ListenerId),
    ClearStyles { touched: usize },
    Reload,
}

/// A node currently attached to the recording surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedNode {
    pub id: NodeId,
    pub spec: NodeSpec,
    origin: Origin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Page,
    Injected,
    Runtime,
}

/// Recording [`Surface`] implementation.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    nodes: BTreeMap<NodeId, RecordedNode>,
    pristine: BTreeMap<NodeId, NodeSpec>,
    listeners: BTreeMap<ListenerId, SignalKind>,
    next_node: u64,
    next_listener: u64,
    log: Vec<Mutation>,
    reloads: usize,
    fail_clear: Option<SurfaceError>,
    fail_reload: Option<SurfaceError>,
}

impl RecordingSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    // === Page setup ===

    /// Add a node that belongs to the served page. Not logged.
    pub fn insert_page_node(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.alloc_node();
        self.pristine.insert(id, spec.clone());
        self.nodes.insert(id, RecordedNode { id, spec, origin: Origin::Page });
        id
    }

    /// Add a node injected at runtime by another feature. Not logged.
    pub fn inject_node(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.alloc_node();
        self.nodes.insert(id, RecordedNode { id, spec, origin: Origin::Injected });
        id
    }

    /// Inject a `<style>` node with the given text.
    pub fn inject_stylesheet(&mut self, css: &str) -> NodeId {
        self.inject_node(NodeSpec::new("style").with_text(css))
    }

    /// Override the inline style of an existing node without logging it,
    /// as another feature would.
    pub fn apply_foreign_style(&mut self, node: NodeId, property: &str, value: &str) -> bool {
        match self.nodes.get_mut(&node) {
            Some(n) => {
                set_style_entry(&mut n.spec.styles, property.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    /// Make the next `clear_inline_styles` call fail.
    pub fn fail_next_clear(&mut self, error: SurfaceError) {
        self.fail_clear = Some(error);
    }

    /// Make the next `reload` call fail.
    pub fn fail_next_reload(&mut self, error: SurfaceError) {
        self.fail_reload = Some(error);
    }

    // === Inspection ===

    pub fn node(&self, id: NodeId) -> Option<&RecordedNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RecordedNode> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes appended through the [`Surface`] trait.
    pub fn runtime_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.origin == Origin::Runtime)
            .map(|n| n.id)
            .collect()
    }

    /// Nodes injected by other features that are still attached.
    pub fn injected_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.origin == Origin::Injected)
            .map(|n| n.id)
            .collect()
    }

    pub fn style_of(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes.get(&node).and_then(|n| n.spec.style(property))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listeners_for(&self, kind: SignalKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn is_listening(&self, listener: ListenerId) -> bool {
        self.listeners.contains_key(&listener)
    }

    pub fn log(&self) -> &[Mutation] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn reload_count(&self) -> usize {
        self.reloads
    }

    fn alloc_node(&mut self) -> NodeId {
        self.next_node += 1;
        NodeId(self.next_node)
    }
}

impl Surface for RecordingSurface {
    fn append_node(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.alloc_node();
        trace!(%id, tag = %spec.tag, "append node");
        self.nodes.insert(id, RecordedNode { id, spec, origin: Origin::Runtime });
        self.log.push(Mutation::Append(id));
        id
    }

    fn remove_node(&mut self, node: NodeId) -> bool {
        if self.nodes.remove(&node).is_none() {
            return false;
        }
        self.log.push(Mutation::Remove(node));
        true
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> bool {
        let Some(n) = self.nodes.get_mut(&node) else {
            return false;
        };
        set_style_entry(&mut n.spec.styles, property.to_string(), value.to_string());
        self.log.push(Mutation::SetStyle {
            node,
            property: property.to_string(),
            value: value.to_string(),
        });
        true
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn subscribe(&mut self, kind: SignalKind) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.insert(id, kind);
        self.log.push(Mutation::Subscribe(id, kind));
        id
    }

    fn unsubscribe(&mut self, listener: ListenerId) -> bool {
        if self.listeners.remove(&listener).is_none() {
            return false;
        }
        self.log.push(Mutation::Unsubscribe(listener));
        true
    }

    fn stylesheets(&self) -> Vec<(NodeId, String)> {
        self.nodes
            .values()
            .filter(|n| n.spec.tag.eq_ignore_ascii_case("style"))
            .map(|n| (n.id, n.spec.text.join("\n")))
            .collect()
    }

    fn find_by_dom_id(&self, dom_id: &str) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|n| n.spec.dom_id.as_deref() == Some(dom_id))
            .map(|n| n.id)
    }

    fn nodes_with_inline_style_containing(&self, needle: &str) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.spec.inline_style().contains(needle))
            .map(|n| n.id)
            .collect()
    }

    fn clear_inline_styles(
        &mut self,
        selectors: &[&str],
        properties: &[&str],
        exclude: &[NodeId],
    ) -> Result<usize, SurfaceError> {
        if let Some(err) = self.fail_clear.take() {
            return Err(err);
        }
        let mut touched = 0;
        for node in self.nodes.values_mut() {
            if exclude.contains(&node.id) {
                continue;
            }
            if !selectors.iter().any(|s| node.spec.matches_selector(s)) {
                continue;
            }
            let before = node.spec.styles.len();
            node.spec
                .styles
                .retain(|(p, _)| !properties.contains(&p.as_str()));
            if node.spec.styles.len() != before {
                touched += 1;
            }
        }
        self.log.push(Mutation::ClearStyles { touched });
        Ok(touched)
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        if let Some(err) = self.fail_reload.take() {
            return Err(err);
        }
        self.nodes = self
            .pristine
            .iter()
            .map(|(id, spec)| {
                let node = RecordedNode {
                    id: *id,
                    spec: spec.clone(),
                    origin: Origin::Page,
                };
                (*id, node)
            })
            .collect();
        self.listeners.clear();
        self.reloads += 1;
        self.log.push(Mutation::Reload);
        Ok(())
    }
}
