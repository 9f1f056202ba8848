//! Configuration file schema for ecs-summarizer.
//!
//! Configuration is optional; every field has a default.

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::summarize::{DeclarationKind, LineEnding};

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["ecs-summarizer.yaml", ".ecs-summarizer.yaml"];

/// Contents written by `ecs-summarizer init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Unity folders holding engine caches and package sources.
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &["**/Library/**", "**/Packages/**"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Declaration kinds to summarize
    pub kinds: Vec<DeclarationKind>,
    /// File extensions scanned when walking a directory
    pub extensions: Vec<String>,
    /// Glob patterns for paths to skip (e.g., "**/Generated/**")
    pub excluded_paths: Vec<String>,
    /// Line terminator for inserted summary lines
    pub line_ending: LineEnding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kinds: DeclarationKind::ALL.to_vec(),
            extensions: vec!["cs".to_string()],
            excluded_paths: DEFAULT_EXCLUDED_PATHS.iter().map(|p| p.to_string()).collect(),
            line_ending: LineEnding::Auto,
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parse a configuration from YAML text.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes as null.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load from `explicit` if given, otherwise from a discovered file in
    /// `dir`, otherwise defaults. Returns the path that was loaded, if any.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(dir),
        };
        let config = match &path {
            Some(p) => Config::parse_file(p)?,
            None => Config::default(),
        };
        validate(&config)?;
        Ok((config, path))
    }

    /// Check whether `path` has one of the configured extensions.
    pub fn has_extension(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Compile `excluded_paths` into a matcher.
    pub fn excluded_matcher(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("compiling glob {:?}: {}", pattern, e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}

/// Find a configuration file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a configuration.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.kinds.is_empty() {
        anyhow::bail!("kinds must list at least one of: type_sets, queries");
    }
    if config.extensions.iter().all(|e| e.trim().is_empty()) {
        anyhow::bail!("extensions must list at least one file extension");
    }
    config.excluded_matcher()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.kinds, DeclarationKind::ALL);
        assert!(config.has_extension(Path::new("Systems/Move.cs")));
        assert!(config.has_extension(Path::new("Systems/Move.CS")));
        assert!(!config.has_extension(Path::new("Systems/Move.rs")));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_defaults_match_template() {
        let defaults = Config::default();
        let template = Config::parse_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(defaults.kinds, template.kinds);
        assert_eq!(defaults.extensions, template.extensions);
        assert_eq!(defaults.excluded_paths, template.excluded_paths);
        assert_eq!(defaults.line_ending, template.line_ending);

        let matcher = defaults.excluded_matcher().unwrap();
        assert!(matcher.is_match("Packages/com.vendor.tools/Runtime/Tool.cs"));
        assert!(matcher.is_match("Library/PackageCache/Foo.cs"));
        assert!(!matcher.is_match("Assets/Scripts/Move.cs"));
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse_str("kinds: [queries]\nline_ending: crlf\n").unwrap();
        assert_eq!(config.kinds, [DeclarationKind::Query]);
        assert_eq!(config.line_ending, LineEnding::Crlf);
        assert_eq!(config.extensions, ["cs"]);
    }

    #[test]
    fn test_parse_empty() {
        let config = Config::parse_str("").unwrap();
        assert_eq!(config.kinds.len(), 2);
    }

    #[test]
    fn test_template_parses() {
        let config = Config::parse_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(validate(&config).is_ok());
        assert_eq!(config.kinds, DeclarationKind::ALL);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Config::parse_str("kinds: [systems]").is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        config.kinds.clear();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.excluded_paths = vec!["[".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excluded_matcher() {
        let config = Config::parse_str("excluded_paths: [\"**/Generated/**\"]").unwrap();
        let matcher = config.excluded_matcher().unwrap();
        assert!(matcher.is_match("Assets/Scripts/Generated/Foo.cs"));
        assert!(!matcher.is_match("Assets/Scripts/Systems/Foo.cs"));
    }

    #[test]
    fn test_load_discovers_file() {
        let temp = TempDir::new().unwrap();
        let (config, path) = Config::load(None, temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.kinds.len(), 2);

        std::fs::write(temp.path().join(".ecs-summarizer.yaml"), "kinds: [type_sets]\n").unwrap();
        let (config, path) = Config::load(None, temp.path()).unwrap();
        assert_eq!(path, Some(temp.path().join(".ecs-summarizer.yaml")));
        assert_eq!(config.kinds, [DeclarationKind::TypeSet]);
    }
}
