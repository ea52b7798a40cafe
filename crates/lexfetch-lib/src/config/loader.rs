use super::Config;
use crate::error::LexFetchError;
use config::Config as ConfigBuilder;

pub const ENV_PREFIX: &str = "LEXFETCH";

/// Loads the configuration from an optional file, layered under `LEXFETCH_*`
/// environment overrides. Missing fields fall back to the built-in defaults.
pub fn load_config(config_path: Option<&str>) -> Result<Config, LexFetchError> {
    let mut builder = ConfigBuilder::builder();
    if let Some(config_path) = config_path {
        builder = builder.add_source(config::File::with_name(config_path));
    }

    let config: Config = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<(), LexFetchError> {
    let http = &config.http;
    for (name, value) in [
        ("http.listing_timeout_secs", http.listing_timeout_secs),
        ("http.transfer_timeout_secs", http.transfer_timeout_secs),
        ("http.chunk_size", http.chunk_size as u64),
    ] {
        if value == 0 {
            return Err(LexFetchError::ConfigValidation {
                details: format!("{name} must be greater than 0"),
            });
        }
    }

    if !config.object_store.bucket_url_template.contains("{bucket}") {
        return Err(LexFetchError::ConfigValidation {
            details: "object_store.bucket_url_template must contain a {bucket} placeholder"
                .to_string(),
        });
    }

    Ok(())
}
