//! Runtime configuration
//!
//! `defaults/dynparse.default.toml` is embedded into the library so that the documented
//! defaults and [`ParserConfig::default`] stay in sync. Callers layer their own files or
//! overrides on top with [`Loader`].

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;

const DEFAULT_TOML: &str = include_str!("../../defaults/dynparse.default.toml");

/// Everything a [`Parser`](super::parser::Parser) can be tuned with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    pub engine: EngineConfig,
    pub diagnostics: DiagnosticsConfig,
    pub treeviz: TreevizConfig,
}

/// Limits applied while matching
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    pub max_depth: usize,
}

/// Shape of the `expected` list in a parse error
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagnosticsConfig {
    pub max_expected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreevizConfig {
    pub max_label_width: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig { max_depth: 512 },
            diagnostics: DiagnosticsConfig { max_expected: 8 },
            treeviz: TreevizConfig {
                max_label_width: 30,
            },
        }
    }
}

/// Layers user overrides over the built-in defaults
///
/// Sources apply in the order they are added, later ones winning key by key. Nothing is read
/// until [`Loader::build`].
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. A missing file is an error at [`Loader::build`].
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may be absent
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key, e.g. `engine.max_depth`
    ///
    /// Overrides beat every file regardless of the order they were added in.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Read every layered source and deserialize the merged result
    ///
    /// Fails on a missing required file or on a value that does not fit its key's type.
    pub fn build(self) -> Result<ParserConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone, for callers with nothing to layer
pub fn load_defaults() -> Result<ParserConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.engine.max_depth, 512);
        assert_eq!(config.diagnostics.max_expected, 8);
    }

    #[test]
    fn test_override_applies() {
        let config = Loader::new()
            .set_override("engine.max_depth", 16_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.engine.max_depth, 16);
        assert_eq!(config.treeviz.max_label_width, 30);
    }

    #[test]
    fn test_override_beats_defaults_for_every_section() {
        let config = Loader::new()
            .set_override("diagnostics.max_expected", 2_i64)
            .and_then(|loader| loader.set_override("treeviz.max_label_width", 12_i64))
            .expect("overrides to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.diagnostics.max_expected, 2);
        assert_eq!(config.treeviz.max_label_width, 12);
        assert_eq!(config.engine.max_depth, 512);
    }

    #[test]
    fn test_wrong_type_fails_to_build() {
        let result = Loader::new()
            .set_override("engine.max_depth", "deep")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/dynparse.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn test_missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/nonexistent/dynparse.toml")
            .build()
            .is_err());
    }
}
