//! Disclosure state: what the user has revealed so far.
//!
//! The state is an immutable value; every transition is a pure function that
//! returns a new state. Click handlers run on a single UI thread and never
//! interleave, so no synchronization is needed here.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::data::{MemberKind, MemberRegistry};
use crate::lineage::ORIGIN_MALE_UID;

/// The visible/expanded bookkeeping for one tree session.
///
/// `visible_nodes` only ever grows; there is no collapse operation. A session
/// is reset by discarding the state and starting from [`DisclosureState::initial`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisclosureState {
    /// Member uids currently rendered.
    pub visible_nodes: IndexSet<String>,
    /// Uids whose spouses (descendant clicks) or children (spouse clicks)
    /// have been revealed. One set tracks both, keyed by the clicked node.
    pub expanded: IndexSet<String>,
    /// Descendant uid -> the spouse uid currently holding that descendant's
    /// children in the rendered tree. Exists purely so repeated expansions
    /// never move a family's children to a different spouse.
    pub spouse_assignments: IndexMap<String, String>,
    /// Advisory generation counter, bumped on each children-reveal.
    /// Display-only; not used for correctness.
    pub current_generation: u32,
    /// Tie-break hint for spouse ownership when no assignment exists yet.
    pub last_clicked: Option<String>,
}

impl DisclosureState {
    /// The state of a fresh session: only the origin male is visible.
    pub fn initial() -> Self {
        let mut visible_nodes = IndexSet::new();
        visible_nodes.insert(ORIGIN_MALE_UID.to_string());
        DisclosureState {
            visible_nodes,
            expanded: IndexSet::new(),
            spouse_assignments: IndexMap::new(),
            current_generation: 1,
            last_clicked: None,
        }
    }

    /// Apply a "node was clicked" event, returning the next state.
    ///
    /// - Clicking a descendant with at least one spouse reveals its spouses.
    /// - Clicking a spouse with at least one child reveals the couple's
    ///   children (the spouse's own recorded children plus their partners'
    ///   children, since a child may carry only one parent reference), plus
    ///   each child's own spouses: one level of look-ahead, so the new
    ///   children immediately show their expansion affordance. Bumps the
    ///   generation counter.
    /// - Everything else (unresolvable uid, nothing to reveal, a node
    ///   already expanded) is a no-op. Re-clicks are idempotent.
    pub fn apply_click(&self, registry: &MemberRegistry, clicked_uid: &str) -> DisclosureState {
        let Some(index) = registry.index_of(clicked_uid) else {
            return self.clone();
        };
        if self.expanded.contains(clicked_uid) {
            return self.clone();
        }

        match registry.kind_at(index) {
            MemberKind::Descendant => {
                let spouses = registry.spouses_of(index);
                if spouses.is_empty() {
                    return self.clone();
                }
                let mut next = self.clone();
                for spouse in spouses {
                    next.visible_nodes.insert(registry.uid_at(spouse).to_string());
                }
                next.expanded.insert(clicked_uid.to_string());
                next.last_clicked = Some(clicked_uid.to_string());
                next
            }
            MemberKind::Spouse => {
                let mut children = registry.children_of(index);
                for partner in registry.spouses_of(index) {
                    for child in registry.children_of(partner) {
                        if !children.contains(&child) {
                            children.push(child);
                        }
                    }
                }
                if children.is_empty() {
                    return self.clone();
                }
                let mut next = self.clone();
                for child in children {
                    next.visible_nodes.insert(registry.uid_at(child).to_string());
                    for spouse in registry.spouses_of(child) {
                        next.visible_nodes.insert(registry.uid_at(spouse).to_string());
                    }
                }
                next.expanded.insert(clicked_uid.to_string());
                next.current_generation += 1;
                next.last_clicked = Some(clicked_uid.to_string());
                next
            }
        }
    }

    /// Fold spouse-ownership choices made by the assembler back into the
    /// state. Existing assignments always win, so a branch's children never
    /// silently move to a spouse revealed later.
    pub fn record_assignments(&self, assignments: &IndexMap<String, String>) -> DisclosureState {
        let mut next = self.clone();
        for (descendant, spouse) in assignments {
            next.spouse_assignments
                .entry(descendant.clone())
                .or_insert_with(|| spouse.clone());
        }
        next
    }
}

impl Default for DisclosureState {
    fn default() -> Self {
        Self::initial()
    }
}
