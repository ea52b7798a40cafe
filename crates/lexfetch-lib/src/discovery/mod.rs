mod object_store;
mod tree_host;
mod types;

pub use object_store::{
    ObjectStoreDiscoverer, alternate_endpoints, extract_keys, find_bucket_name,
};
pub use tree_host::{TreeHostDiscoverer, extract_anchor_links, filter_archives, filter_reporters};
pub use types::{DiscoveredKeys, DiscoveryStrategy, Reporter};
