use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use kosha_config::Config;

const DEFAULT_CONFIG_FILE: &str = "kosha.json";

/// Config file to read: explicit path, then `KOSHA_CONFIG`, then `./kosha.json` if present
fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }

    if let Ok(path) = env::var("KOSHA_CONFIG") {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file =
        File::open(path).with_context(|| format!("Failed to open config {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

/// Load the config file if there is one, otherwise build it from the environment
pub fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<Config> {
    match config_path(explicit) {
        Some(path) => load_config_file(&path),
        None => Ok(Config::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kosha_config::PageFormat;
    use uuid::Uuid;

    #[test]
    fn test_explicit_file_is_loaded() {
        let path = env::temp_dir().join(format!("kosha-config-{}.json", Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"{ "upstream": { "base_url": "http://localhost:9000", "format": "json" } }"#,
        )
        .unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.upstream.base_url, "http://localhost:9000");
        assert_eq!(config.upstream.format, PageFormat::Json);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = env::temp_dir().join(format!("kosha-missing-{}.json", Uuid::new_v4()));
        assert!(load_config(Some(path)).is_err());
    }
}
