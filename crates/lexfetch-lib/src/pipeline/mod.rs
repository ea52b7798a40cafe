mod object_store;
mod plan;
mod tree_host;

pub use object_store::{ObjectStoreOutcome, ask_confirmation, key_url, mirror_object_keys};
pub use plan::{PlanAction, PlannedItem, plan_item};
pub use tree_host::{TreeHostRun, mirror_tree_host};
