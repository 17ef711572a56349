use std::collections::HashMap;

use crate::error::{Result, TreeError};

use super::member::{Member, MemberKind};

/// An indexed, immutable snapshot of the full member list.
///
/// Members are mapped to contiguous 0-based indices in snapshot order. The
/// registry is built once per tree session and never mutated; refreshing the
/// snapshot means rebuilding the registry (and discarding any disclosure
/// state derived from it).
///
/// Each member's [`MemberKind`] is decided here, at ingestion, from the
/// identifier prefix convention, so downstream code never re-derives it from
/// strings.
#[derive(Debug, Clone)]
pub struct MemberRegistry {
    /// Members in snapshot order.
    members: Vec<Member>,
    /// Kind of each member, parallel to `members`.
    kinds: Vec<MemberKind>,
    /// Mapping from `unique_id` to 0-based index.
    id_to_index: HashMap<String, usize>,
    /// Mapping from lowercased, trimmed `(first, last)` name to index.
    /// First occurrence wins; used only for the father name fallback.
    name_to_index: HashMap<(String, String), usize>,
}

impl MemberRegistry {
    /// Build a registry from a complete member snapshot.
    ///
    /// # Errors
    /// Returns an error if two members share a `unique_id`. Dangling
    /// relationship references are *not* an error; they degrade to empty
    /// lookups later.
    pub fn from_members(members: Vec<Member>) -> Result<Self> {
        let mut id_to_index = HashMap::with_capacity(members.len());
        let mut name_to_index = HashMap::new();
        let mut kinds = Vec::with_capacity(members.len());

        for (index, member) in members.iter().enumerate() {
            if id_to_index
                .insert(member.unique_id.clone(), index)
                .is_some()
            {
                return Err(TreeError::DuplicateId(member.unique_id.clone()));
            }
            kinds.push(MemberKind::from_uid(&member.unique_id));
            name_to_index
                .entry(name_key(&member.first_name, &member.last_name))
                .or_insert(index);
        }

        Ok(MemberRegistry {
            members,
            kinds,
            id_to_index,
            name_to_index,
        })
    }

    /// Number of members in the snapshot.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All members in snapshot order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Look up the 0-based index of a member by `unique_id`.
    pub fn index_of(&self, uid: &str) -> Option<usize> {
        self.id_to_index.get(uid).copied()
    }

    /// Look up a member by `unique_id`.
    pub fn get(&self, uid: &str) -> Option<&Member> {
        self.index_of(uid).map(|i| &self.members[i])
    }

    /// The member at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn member_at(&self, index: usize) -> &Member {
        &self.members[index]
    }

    /// The `unique_id` of the member at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn uid_at(&self, index: usize) -> &str {
        &self.members[index].unique_id
    }

    /// The kind of the member at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn kind_at(&self, index: usize) -> MemberKind {
        self.kinds[index]
    }

    /// The kind of a member by `unique_id`, if present.
    pub fn kind_of(&self, uid: &str) -> Option<MemberKind> {
        self.index_of(uid).map(|i| self.kinds[i])
    }

    /// Resolve the father of the member at `index`.
    ///
    /// Tries `fathers_uid` first; when that is absent or dangling, falls back
    /// to a case-insensitive, trimmed match on the recorded father name.
    /// Returns `None` when neither path resolves.
    pub fn resolve_father(&self, index: usize) -> Option<usize> {
        let member = &self.members[index];

        if let Some(uid) = &member.fathers_uid {
            if let Some(&i) = self.id_to_index.get(uid) {
                return Some(i);
            }
        }

        match (&member.fathers_first_name, &member.fathers_last_name) {
            (Some(first), Some(last)) => {
                self.name_to_index.get(&name_key(first, last)).copied()
            }
            _ => None,
        }
    }
}

fn name_key(first: &str, last: &str) -> (String, String) {
    (
        first.trim().to_lowercase(),
        last.trim().to_lowercase(),
    )
}
