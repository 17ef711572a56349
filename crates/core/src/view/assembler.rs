//! Tree assembly: snapshot + disclosure state -> renderable node hierarchy.
//!
//! The assembler is read-only over both inputs. Spouse-ownership choices it
//! makes along the way are returned in [`TreeAssembly::spouse_assignments`]
//! for the caller to fold back into the state via
//! [`DisclosureState::record_assignments`], which is what keeps repeated
//! derivations stable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::{Gender, MemberRegistry};
use crate::error::{Result, TreeError};
use crate::lineage::{resolve_color, LineageColor, ORIGIN_MALE_UID, ORIGIN_SPOUSE_UID};

use super::state::DisclosureState;

/// What a rendered node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// A member record.
    Person,
    /// The synthetic root grouping the origin couple.
    CoupleGroup,
    /// A synthetic node clustering a descendant with their expanded
    /// spouse(s).
    FamilyGroup,
}

/// Derived display attributes; nothing here is stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub color: LineageColor,
    pub color_hex: String,
    pub has_children: bool,
    pub spouse_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// One node of the assembled tree, in the generic name/attributes/children
/// shape a tree-rendering surface consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayNode {
    pub name: String,
    pub attributes: NodeAttributes,
    #[serde(default)]
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    /// Depth-first search for the node carrying `uid`.
    pub fn find(&self, uid: &str) -> Option<&DisplayNode> {
        if self.attributes.uid.as_deref() == Some(uid) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(uid))
    }
}

/// The assembled tree plus the spouse-ownership map in effect after this
/// assembly (pre-existing entries and the choices made while building).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeAssembly {
    pub root: DisplayNode,
    pub spouse_assignments: IndexMap<String, String>,
}

/// Assemble the renderable tree for the current disclosure state.
///
/// The root is always the synthetic origin-couple group holding the origin
/// male and, once revealed, the origin spouse; the origin male's children
/// attach under the spouse node, as everywhere else in the tree.
///
/// # Errors
/// Fails with [`TreeError::MissingOrigin`] when the origin male is absent
/// from the snapshot. Every other gap in the data degrades to "treat as
/// none".
pub fn assemble_tree(
    registry: &MemberRegistry,
    state: &DisclosureState,
) -> Result<TreeAssembly> {
    let origin = registry
        .index_of(ORIGIN_MALE_UID)
        .ok_or_else(|| TreeError::MissingOrigin(ORIGIN_MALE_UID.to_string()))?;

    let mut assembler = Assembler {
        registry,
        state,
        assignments: state.spouse_assignments.clone(),
    };
    let root = assembler.build_root(origin);

    Ok(TreeAssembly {
        root,
        spouse_assignments: assembler.assignments,
    })
}

struct Assembler<'a> {
    registry: &'a MemberRegistry,
    state: &'a DisclosureState,
    assignments: IndexMap<String, String>,
}

impl Assembler<'_> {
    fn build_root(&mut self, origin: usize) -> DisplayNode {
        // Children of the origin couple hang under the spouse node, never
        // under the origin male himself.
        let mut children = vec![self.person_node(origin, Vec::new())];

        if self.state.visible_nodes.contains(ORIGIN_SPOUSE_UID) {
            if let Some(spouse) = self.registry.index_of(ORIGIN_SPOUSE_UID) {
                let grandchildren =
                    self.visible_children_nodes(origin, ORIGIN_SPOUSE_UID);
                children.push(self.person_node(spouse, grandchildren));
            }
        }

        let name = format!("{} family", self.registry.member_at(origin).last_name);
        group_node(NodeType::CoupleGroup, name, children)
    }

    /// Build the subtree for one visible descendant.
    ///
    /// Enforces the branching rule: the descendant's children stay withheld
    /// until the descendant has been expanded and at least one spouse is
    /// visible, and then attach exclusively under the chosen spouse node.
    fn build_descendant(&mut self, index: usize, parent_ctx: Option<&str>) -> DisplayNode {
        let uid = self.registry.uid_at(index).to_string();

        let visible_spouses: Vec<usize> = self
            .registry
            .spouses_of(index)
            .into_iter()
            .filter(|&s| self.state.visible_nodes.contains(self.registry.uid_at(s)))
            .collect();

        if !self.state.expanded.contains(&uid) || visible_spouses.is_empty() {
            return self.person_node(index, Vec::new());
        }

        let chosen = self.choose_spouse(&uid, &visible_spouses, parent_ctx);
        let chosen_uid = self.registry.uid_at(chosen).to_string();
        self.assignments
            .entry(uid)
            .or_insert_with(|| chosen_uid.clone());

        let mut child_nodes = Some(self.visible_children_nodes(index, &chosen_uid));

        let mut group_children = vec![self.person_node(index, Vec::new())];
        for &spouse in &visible_spouses {
            let kids = if spouse == chosen {
                child_nodes.take().unwrap_or_default()
            } else {
                Vec::new()
            };
            group_children.push(self.person_node(spouse, kids));
        }

        let name = format!(
            "{} family",
            self.registry.member_at(index).display_name()
        );
        group_node(NodeType::FamilyGroup, name, group_children)
    }

    /// Assemble this member's visible children, threading the owning spouse
    /// down as the context for their own spouse selection.
    fn visible_children_nodes(&mut self, index: usize, owner_uid: &str) -> Vec<DisplayNode> {
        let children: Vec<usize> = self
            .registry
            .children_of(index)
            .into_iter()
            .filter(|&c| self.state.visible_nodes.contains(self.registry.uid_at(c)))
            .collect();

        let owner = owner_uid.to_string();
        children
            .into_iter()
            .map(|c| self.build_descendant(c, Some(&owner)))
            .collect()
    }

    /// Pick the spouse that owns this descendant's children.
    ///
    /// Priority: a recorded assignment, then the spouse context inherited
    /// from the ancestor branch, then the most recently clicked node, then
    /// the first visible spouse.
    fn choose_spouse(
        &self,
        descendant_uid: &str,
        visible_spouses: &[usize],
        parent_ctx: Option<&str>,
    ) -> usize {
        let find = |wanted: &str| {
            visible_spouses
                .iter()
                .copied()
                .find(|&s| self.registry.uid_at(s) == wanted)
        };

        if let Some(assigned) = self.assignments.get(descendant_uid) {
            if let Some(s) = find(assigned) {
                return s;
            }
        }
        if let Some(ctx) = parent_ctx {
            if let Some(s) = find(ctx) {
                return s;
            }
        }
        if let Some(last) = self.state.last_clicked.as_deref() {
            if let Some(s) = find(last) {
                return s;
            }
        }
        visible_spouses[0]
    }

    fn person_node(&self, index: usize, children: Vec<DisplayNode>) -> DisplayNode {
        let member = self.registry.member_at(index);
        let color = resolve_color(self.registry, index);
        DisplayNode {
            name: member.display_name(),
            attributes: NodeAttributes {
                node_type: NodeType::Person,
                uid: Some(member.unique_id.clone()),
                gender: Some(member.gender),
                color,
                color_hex: color.hex().to_string(),
                has_children: !self.registry.children_of(index).is_empty(),
                spouse_count: self.registry.spouses_of(index).len(),
                picture: member.picture_link.clone(),
            },
            children,
        }
    }
}

fn group_node(node_type: NodeType, name: String, children: Vec<DisplayNode>) -> DisplayNode {
    DisplayNode {
        name,
        attributes: NodeAttributes {
            node_type,
            uid: None,
            gender: None,
            color: LineageColor::Neutral,
            color_hex: LineageColor::Neutral.hex().to_string(),
            has_children: false,
            spouse_count: 0,
            picture: None,
        },
        children,
    }
}
