//! Permission-driven menu filtering.
//!
//! Derives the navigation tree a user actually sees from the static menu
//! definition and the current permission set.

use atrium_authz::{AccessKind, AuthorizationQuery};

use crate::definition::{MenuGate, MenuNode};

/// Filters a static menu definition down to the authorized nodes.
pub struct MenuAuthorizationEngine {
    query: AuthorizationQuery,
}

impl MenuAuthorizationEngine {
    /// Create an engine over the given query surface.
    pub fn new(query: AuthorizationQuery) -> Self {
        Self { query }
    }

    /// Filter the menu tree against the current permission set.
    ///
    /// Depth-first: a node survives iff any of its gate's capability names
    /// is opened with the view capability (OR semantics across a list), and
    /// a branch whose filtered children come up empty is dropped even
    /// though its own gate passed. A gate name is opened by a grant whose
    /// routine name it contains, ignoring case: a grant on "Perfis" opens
    /// the "Controle de Perfis" gate. Filtering is idempotent.
    ///
    /// **Empty-set policy**: with no permissions loaded at all, the whole
    /// tree is returned unfiltered. This is the opposite fail-safe posture
    /// from the query layer, which denies on an empty set. The asymmetry is
    /// long-standing observed behavior of the portal and is kept on purpose;
    /// do not align the two without product sign-off.
    pub fn filter(&self, menu: &[MenuNode]) -> Vec<MenuNode> {
        if !self.query.any_permissions_loaded() {
            log::debug!("no permissions loaded, menu left unrestricted");
            return menu.to_vec();
        }
        menu.iter().filter_map(|node| self.filter_node(node)).collect()
    }

    fn filter_node(&self, node: &MenuNode) -> Option<MenuNode> {
        if !self.gate_passes(&node.requires) {
            return None;
        }
        if node.is_leaf() {
            return Some(node.clone());
        }
        let children: Vec<MenuNode> = node
            .children
            .iter()
            .filter_map(|child| self.filter_node(child))
            .collect();
        if children.is_empty() {
            // Gate passed but nothing remains underneath; an empty branch
            // would render as a dead header.
            return None;
        }
        Some(MenuNode {
            title: node.title.clone(),
            requires: node.requires.clone(),
            children,
        })
    }

    fn gate_passes(&self, gate: &MenuGate) -> bool {
        gate.names()
            .iter()
            .any(|name| self.query.holds_capability(name, AccessKind::View))
    }
}

// ============================================================================
// Tests
// ============================================================================
