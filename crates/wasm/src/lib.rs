//! Family lineage WebAssembly module.
//!
//! Browser-friendly wrappers over the tree engine: JSON strings in, JSON
//! strings out, no file I/O. The web front end keeps the member snapshot and
//! the disclosure state on its side and calls back in on every click.

use family_lineage_core::data::{Member, MemberRegistry};
use family_lineage_core::lineage::validate_color_inheritance;
use family_lineage_core::view::{assemble_tree, DisclosureState};

fn parse_registry(members_json: &str) -> Result<MemberRegistry, String> {
    let members: Vec<Member> =
        serde_json::from_str(members_json).map_err(|e| format!("JSON parse error: {}", e))?;
    MemberRegistry::from_members(members).map_err(|e| e.to_string())
}

fn parse_state(state_json: &str) -> Result<DisclosureState, String> {
    serde_json::from_str(state_json).map_err(|e| format!("JSON parse error: {}", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("JSON serialize error: {}", e))
}

/// The state of a fresh tree session (only the origin male visible).
pub fn initial_state_json() -> Result<String, String> {
    to_json(&DisclosureState::initial())
}

/// Apply a "node was clicked" event and return the next state.
pub fn apply_click_json(
    members_json: &str,
    state_json: &str,
    clicked_uid: &str,
) -> Result<String, String> {
    let registry = parse_registry(members_json)?;
    let state = parse_state(state_json)?;
    to_json(&state.apply_click(&registry, clicked_uid))
}

/// Assemble the renderable tree for the given state.
///
/// Returns `{"tree": ..., "spouse_assignments": ..., "state": ...}` where
/// `state` is the input state with the assembly's spouse-ownership choices
/// already folded back in; the caller should carry that state forward.
pub fn assemble_tree_json(members_json: &str, state_json: &str) -> Result<String, String> {
    let registry = parse_registry(members_json)?;
    let state = parse_state(state_json)?;

    let assembly = assemble_tree(&registry, &state).map_err(|e| e.to_string())?;
    let state = state.record_assignments(&assembly.spouse_assignments);

    let result = serde_json::json!({
        "tree": assembly.root,
        "spouse_assignments": assembly.spouse_assignments,
        "state": state,
    });
    to_json(&result)
}

/// Run the color-inheritance diagnostics and return the anomaly list.
pub fn validate_members_json(members_json: &str) -> Result<String, String> {
    let registry = parse_registry(members_json)?;
    to_json(&validate_color_inheritance(&registry))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMBERS: &str = r#"[
        {"unique_id": "D00Z00001", "first_name": "Kwame", "last_name": "Mensah",
         "gender": "male", "spouse_uid": "S00Z00001"},
        {"unique_id": "S00Z00001", "first_name": "Esi", "last_name": "Mensah",
         "gender": "female", "spouse_uid": "D00Z00001"},
        {"unique_id": "D01Z00001", "first_name": "Yaw", "last_name": "Mensah",
         "gender": "male", "fathers_uid": "D00Z00001", "order_of_birth": 1}
    ]"#;

    #[test]
    fn test_initial_state_round_trip() {
        let state = initial_state_json().unwrap();
        assert!(state.contains("D00Z00001"));
        // The state must parse back.
        let parsed: serde_json::Value = serde_json::from_str(&state).unwrap();
        assert_eq!(parsed["current_generation"], 1);
    }

    #[test]
    fn test_click_then_assemble() {
        let state = initial_state_json().unwrap();
        let state = apply_click_json(MEMBERS, &state, "D00Z00001").unwrap();
        let state = apply_click_json(MEMBERS, &state, "S00Z00001").unwrap();

        let result = assemble_tree_json(MEMBERS, &state).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        // The child hangs under the origin spouse node, not the origin male.
        let root = &parsed["tree"];
        assert_eq!(root["children"][0]["children"].as_array().unwrap().len(), 0);
        assert_eq!(
            root["children"][1]["children"][0]["attributes"]["uid"],
            "D01Z00001"
        );
    }

    #[test]
    fn test_bad_members_json() {
        let err = validate_members_json("not json").unwrap_err();
        assert!(err.contains("JSON parse error"));
    }

    #[test]
    fn test_missing_origin_reported() {
        let members = r#"[{"unique_id": "D01Z00001", "first_name": "Yaw",
                           "last_name": "Mensah", "gender": "male"}]"#;
        let state = initial_state_json().unwrap();
        let err = assemble_tree_json(members, &state).unwrap_err();
        assert!(err.contains("D00Z00001"));
    }
}
