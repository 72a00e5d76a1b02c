use crate::error::ClientError;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides, e.g. `APP_SESSION__INACTIVITY_TIMEOUT_MS`.
pub const ENV_PREFIX: &str = "APP";

/// Locate a crate's `config` directory whether the process runs from the
/// workspace root or from inside the crate itself.
pub fn configuration_directory(crate_dir: &str) -> Result<PathBuf, ClientError> {
    let base_path = std::env::current_dir()?;

    if base_path.ends_with(crate_dir) {
        Ok(base_path.join("config"))
    } else {
        Ok(base_path.join(crate_dir).join("config"))
    }
}

/// Load `base.yaml` from `directory`, then apply `APP_`-prefixed environment
/// overrides (`__` separates nested keys). `.env` is read first if present.
pub fn load_settings<T: DeserializeOwned>(directory: &Path) -> Result<T, ClientError> {
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .add_source(File::from(directory.join("base.yaml")).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<T>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        server: SampleServer,
    }

    #[derive(Debug, Deserialize)]
    struct SampleServer {
        url: String,
        #[serde(default = "default_retries")]
        retries: u32,
    }

    fn default_retries() -> u32 {
        3
    }

    #[test]
    fn loads_yaml_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.yaml"),
            "server:\n  url: \"http://localhost:9096\"\n",
        )
        .unwrap();

        let sample: Sample = load_settings(dir.path()).unwrap();
        assert_eq!(sample.server.url, "http://localhost:9096");
        assert_eq!(sample.server.retries, 3);
    }

    #[test]
    fn missing_base_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Sample, _> = load_settings(dir.path());
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
