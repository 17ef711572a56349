// Lineage module: relationship lookups over the snapshot and the recursive
// lineage color resolver with its data-quality diagnostics.

pub mod color;
pub mod relations;

pub use color::{resolve_color, validate_color_inheritance, ColorAnomaly, LineageColor};

/// The origin male: the fixed seed of every tree session.
pub const ORIGIN_MALE_UID: &str = "D00Z00001";

/// The origin male's spouse.
pub const ORIGIN_SPOUSE_UID: &str = "S00Z00001";

/// The lineage founder: the distinguished root descendant whose direct male
/// children receive the ordinal branch colors.
pub const FOUNDER_UID: &str = "D01Z00001";
