// Data module: the member record, snapshot ingestion, and the indexed
// registry that the rest of the engine queries.

pub mod io;
pub mod member;
pub mod registry;

pub use io::{load_members_csv, load_members_json};
pub use member::{Gender, Member, MemberKind, DESCENDANT_PREFIX, SPOUSE_PREFIX};
pub use registry::MemberRegistry;
