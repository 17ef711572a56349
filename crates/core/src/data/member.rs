use serde::{Deserialize, Serialize};

/// Identifier prefix marking a blood descendant.
pub const DESCENDANT_PREFIX: &str = "D";

/// Identifier prefix marking a spouse by marriage.
pub const SPOUSE_PREFIX: &str = "S";

/// How a member is connected to the tree: by blood or by marriage.
///
/// Decided once at ingestion from the identifier prefix convention
/// (`D...` = descendant, `S...` = spouse). Identifiers with neither prefix
/// are classified as [`MemberKind::Spouse`]: they never carry blood-lineage
/// color and never trigger the descendant click path, which matches the
/// neutral handling the source data model expects for unrecognized IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Descendant,
    Spouse,
}

impl MemberKind {
    /// Classify an identifier by its prefix.
    pub fn from_uid(uid: &str) -> MemberKind {
        if uid.starts_with(DESCENDANT_PREFIX) {
            MemberKind::Descendant
        } else {
            MemberKind::Spouse
        }
    }

    pub fn is_descendant(self) -> bool {
        self == MemberKind::Descendant
    }

    pub fn is_spouse(self) -> bool {
        self == MemberKind::Spouse
    }
}

/// Recorded gender of a member.
///
/// Source data carries free-form strings; anything other than `"male"` or
/// `"female"` (case-insensitive) is [`Gender::Unknown`]. Gender is
/// display-only: parent/child lookups match both parent-reference fields
/// regardless of the parent's recorded gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Parse a gender string, case-insensitively and trimmed.
    pub fn parse(s: &str) -> Gender {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("male") {
            Gender::Male
        } else if trimmed.eq_ignore_ascii_case("female") {
            Gender::Female
        } else {
            Gender::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }
}

/// One person in the genealogy, as supplied by the external snapshot.
///
/// All relationship fields are optional back-references by `unique_id`;
/// dangling references are tolerated everywhere and degrade to "no
/// relationship found". `fathers_first_name`/`fathers_last_name` exist as a
/// name-based fallback for datasets where `fathers_uid` was never recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub unique_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, with = "gender_string")]
    pub gender: Gender,
    #[serde(default)]
    pub fathers_uid: Option<String>,
    #[serde(default)]
    pub mothers_uid: Option<String>,
    #[serde(default)]
    pub fathers_first_name: Option<String>,
    #[serde(default)]
    pub fathers_last_name: Option<String>,
    #[serde(default)]
    pub spouse_uid: Option<String>,
    #[serde(default)]
    pub order_of_birth: Option<u32>,
    #[serde(default)]
    pub picture_link: Option<String>,
}

impl Member {
    /// Create a member with only the required fields set.
    pub fn new(unique_id: &str, first_name: &str, last_name: &str, gender: Gender) -> Member {
        Member {
            unique_id: unique_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender,
            fathers_uid: None,
            mothers_uid: None,
            fathers_first_name: None,
            fathers_last_name: None,
            spouse_uid: None,
            order_of_birth: None,
            picture_link: None,
        }
    }

    /// Full display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Kind derived from the identifier prefix.
    pub fn kind(&self) -> MemberKind {
        MemberKind::from_uid(&self.unique_id)
    }
}

/// Serde adapter: gender travels as a free-form string in snapshots.
mod gender_string {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Gender;

    pub fn serialize<S: Serializer>(gender: &Gender, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(gender.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Gender, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Gender::Unknown, Gender::parse))
    }
}
