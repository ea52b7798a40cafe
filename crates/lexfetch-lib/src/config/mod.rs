mod loader;
mod model;

pub use loader::{ENV_PREFIX, load_config, validate_config};
pub use model::{Config, DEFAULT_CHUNK_SIZE, HttpConfig, ObjectStoreConfig, TreeHostConfig};
