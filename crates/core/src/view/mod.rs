// View module: the disclosure state with its pure click reducer, and the
// assembler that turns snapshot + state into a renderable tree.

pub mod assembler;
pub mod state;

pub use assembler::{assemble_tree, DisplayNode, NodeAttributes, NodeType, TreeAssembly};
pub use state::DisclosureState;
