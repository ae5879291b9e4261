//! Node handles and descriptions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to a node appended to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Opaque handle to a registered signal listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Description of a node to append.
///
/// Styles keep insertion order so the rendered inline style attribute is
/// stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    pub dom_id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub styles: Vec<(String, String)>,
    pub text: Vec<String>,
}

impl NodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_dom_id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set a style property, replacing an existing value in place.
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        set_style_entry(&mut self.styles, property.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }

    /// Look up a style property.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Render the inline style attribute (`prop: value; ...`).
    pub fn inline_style(&self) -> String {
        self.styles
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Match a simple selector: `tag`, `#id`, `.class` or `[attr="value"]`.
    pub fn matches_selector(&self, selector: &str) -> bool {
        let s = selector.trim();
        if let Some(id) = s.strip_prefix('#') {
            return self.dom_id.as_deref() == Some(id);
        }
        if let Some(class) = s.strip_prefix('.') {
            return self.classes.iter().any(|c| c == class);
        }
        if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            return match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim_matches(|c| c == '"' || c == '\'');
                    self.attributes.get(name.trim()).map(String::as_str) == Some(value)
                }
                None => self.attributes.contains_key(inner.trim()),
            };
        }
        self.tag.eq_ignore_ascii_case(s)
    }
}

/// Insert or replace `property` keeping the original position.
pub(crate) fn set_style_entry(styles: &mut Vec<(String, String)>, property: String, value: String) {
    match styles.iter_mut().find(|(p, _)| *p == property) {
        Some(entry) => entry.1 = value,
        None => styles.push((property, value)),
    }
}
