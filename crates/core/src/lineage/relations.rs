//! Relationship lookups over a [`MemberRegistry`] snapshot.
//!
//! All lookups are pure and tolerate incomplete data: dangling references
//! yield empty results, never errors. Genealogical source data is expected
//! to be partial.

use crate::data::MemberRegistry;

impl MemberRegistry {
    /// All spouses of the member at `index`.
    ///
    /// Collects the member referenced by this member's own `spouse_uid` (when
    /// it resolves) plus every member whose `spouse_uid` points back at this
    /// member. Marriage records may be unidirectional or bidirectional; the
    /// result is deduplicated with first occurrence winning.
    pub fn spouses_of(&self, index: usize) -> Vec<usize> {
        let member = self.member_at(index);
        let mut spouses: Vec<usize> = Vec::new();

        if let Some(uid) = &member.spouse_uid {
            if let Some(i) = self.index_of(uid) {
                if i != index {
                    spouses.push(i);
                }
            }
        }

        for (j, other) in self.members().iter().enumerate() {
            if j == index {
                continue;
            }
            if other.spouse_uid.as_deref() == Some(member.unique_id.as_str())
                && !spouses.contains(&j)
            {
                spouses.push(j);
            }
        }

        spouses
    }

    /// All children of the member at `index`, ordered by birth.
    ///
    /// Matches both `fathers_uid` and `mothers_uid` against this member's
    /// identifier, regardless of the member's own recorded gender; gender is
    /// display-only and must not hide children when the data records them.
    /// Sorted ascending by `order_of_birth`; members with no recorded order
    /// sort as 0. The sort is stable, so repeated calls yield identical
    /// output.
    pub fn children_of(&self, index: usize) -> Vec<usize> {
        let uid = self.uid_at(index);
        let mut children: Vec<usize> = Vec::new();

        for (j, other) in self.members().iter().enumerate() {
            if other.fathers_uid.as_deref() == Some(uid)
                || other.mothers_uid.as_deref() == Some(uid)
            {
                if !children.contains(&j) {
                    children.push(j);
                }
            }
        }

        children.sort_by_key(|&j| self.member_at(j).order_of_birth.unwrap_or(0));
        children
    }
}
