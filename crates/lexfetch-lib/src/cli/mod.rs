mod args;
mod interrupt;
mod object_store;
mod params;
mod resolved_command;
mod tree_host;

pub use args::{Args, Command, parse_args};
pub use object_store::run_object_store;
pub use params::{ObjectStoreParams, TreeHostParams};
pub use resolved_command::{ResolvedCommand, resolve_command};
pub use tree_host::run_tree_host;
