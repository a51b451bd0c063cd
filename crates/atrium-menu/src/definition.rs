//! Static menu-tree definition types.
//!
//! The menu is declared once, at compile or config time, and handed to the
//! engine as pure input. Nodes are gated by the display names of the
//! routines that authorize them; a node may list several names, satisfied
//! by ANY of them (items that expose a heterogeneous set of sub-items).

use serde::{Deserialize, Serialize};

/// Capability requirement of a menu node.
///
/// Serializes as a bare string or a list of strings, so menu config reads
/// naturally:
///
/// ```json
/// { "title": "Perfis", "requires": "Controle de Perfis" }
/// { "title": "Configurações", "requires": ["Controle de Perfis", "Controle de Acessos"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuGate {
    /// Gated by a single routine name.
    Single(String),
    /// Gated by any one of several routine names (OR semantics).
    AnyOf(Vec<String>),
}

impl MenuGate {
    /// The routine names this gate accepts, in declaration order.
    pub fn names(&self) -> &[String] {
        match self {
            MenuGate::Single(name) => std::slice::from_ref(name),
            MenuGate::AnyOf(names) => names,
        }
    }
}

impl From<&str> for MenuGate {
    fn from(name: &str) -> Self {
        MenuGate::Single(name.to_string())
    }
}

impl From<Vec<&str>> for MenuGate {
    fn from(names: Vec<&str>) -> Self {
        MenuGate::AnyOf(names.into_iter().map(str::to_string).collect())
    }
}

/// A node in the static menu tree: a top-level section, a branch, or a
/// leaf item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Label shown in the sidebar.
    pub title: String,
    /// Routine name(s) whose view capability authorizes this node.
    pub requires: MenuGate,
    /// Sub-items; empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Build a leaf item.
    pub fn item(title: impl Into<String>, requires: impl Into<MenuGate>) -> Self {
        Self {
            title: title.into(),
            requires: requires.into(),
            children: Vec::new(),
        }
    }

    /// Build a branch with children.
    pub fn section(
        title: impl Into<String>,
        requires: impl Into<MenuGate>,
        children: Vec<MenuNode>,
    ) -> Self {
        Self {
            title: title.into(),
            requires: requires.into(),
            children,
        }
    }

    /// `true` when the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
