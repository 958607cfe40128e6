//! Store configuration for gamerec
//!
//! Configuration is stored in `.gamerec/config.toml`. Every field has a
//! default, so a missing file or a partial file is valid.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{GamerecError, Result};

pub use types::{
    CatalogConfig, RecommendConfig, RecommenderConfig, SimilarityConfig, STORE_FORMAT_VERSION,
};

impl RecommenderConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RecommenderConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GamerecError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.version > STORE_FORMAT_VERSION {
            bail_invalid!("store format version", self.version);
        }
        if self.catalog.identifier_column.trim().is_empty() {
            bail_invalid!("catalog.identifier_column", "(empty)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::Metric;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = RecommenderConfig::default();
        assert_eq!(config.version, STORE_FORMAT_VERSION);
        assert_eq!(config.catalog.identifier_column, "Title");
        assert_eq!(config.similarity.default_metric, Metric::Cosine);
        assert!(config.similarity.parallel);
        assert_eq!(config.recommend.default_count, 3);
    }

    #[test]
    fn test_numbered_columns() {
        let catalog = CatalogConfig::default();
        assert_eq!(catalog.genre_columns(), vec!["Genre1", "Genre2", "Genre3"]);
        let tags = catalog.tag_columns();
        assert_eq!(tags.len(), 20);
        assert_eq!(tags[19], "Tag20");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = RecommenderConfig::default();
        config.similarity.default_metric = Metric::Jaccard;
        config.recommend.default_count = 5;
        config.save(&path).unwrap();

        let loaded = RecommenderConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[recommend]\ndefault_count = 7\n").unwrap();

        let config = RecommenderConfig::load(&path).unwrap();
        assert_eq!(config.recommend.default_count, 7);
        assert_eq!(config.catalog, CatalogConfig::default());
        assert_eq!(config.version, STORE_FORMAT_VERSION);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = RecommenderConfig::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, RecommenderConfig::default());
    }

    #[test]
    fn test_rejects_future_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "version = 99\n").unwrap();

        let err = RecommenderConfig::load(&path).unwrap_err();
        assert!(matches!(err, GamerecError::InvalidValue { .. }));
    }

    #[test]
    fn test_rejects_unknown_metric() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[similarity]\ndefault_metric = \"euclidean\"\n").unwrap();

        assert!(matches!(
            RecommenderConfig::load(&path).unwrap_err(),
            GamerecError::Toml(_)
        ));
    }
}
