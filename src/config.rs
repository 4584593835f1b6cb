//! Configuration loading and types for mdcatalog.
//!
//! A project is described by a single `mdcatalog.yaml` file naming the input
//! document, the output directory, the page layout, and the site identity
//! used by the page shell. Relative paths in the config are resolved against
//! the directory containing the config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

// =============================================================================
// Config types
// =============================================================================

/// Top-level project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub site: SiteConfig,
    /// The markdown catalog document to parse
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// The directory the generated pages are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Which page layout to render records with
    #[serde(default)]
    pub layout: Layout,
}

/// Site identity rendered into the page shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    /// Short tagline shown under the site name in the header
    pub tagline: Option<String>,
}

fn default_input() -> PathBuf {
    PathBuf::from("catalog.md")
}

fn default_output() -> PathBuf {
    PathBuf::from("pages")
}

/// The page layout used for per-record pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Dashboard-style page with contact and description sections
    #[default]
    Card,
    /// Plain table listing every field in source order
    Table,
}

impl Layout {
    /// The embedded template rendering a single record in this layout.
    pub fn template_name(self) -> &'static str {
        match self {
            Layout::Card => "card.html",
            Layout::Table => "table.html",
        }
    }

    /// The separator used when deriving filenames from titles.
    ///
    /// The two layouts historically produced differently-separated
    /// filenames; both survive so regenerating an existing site keeps its
    /// URLs stable.
    pub fn slug_separator(self) -> char {
        match self {
            Layout::Card => '-',
            Layout::Table => '_',
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl CatalogConfig {
    /// Load the config from the command line argument, defaulting to
    /// `mdcatalog.yaml`.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new("mdcatalog.yaml"));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(serde_yaml::from_str(&content)?)
    }

    /// The input document path, resolved against `base_path`.
    pub fn input_path(&self, base_path: &Path) -> PathBuf {
        resolve(&self.input, base_path)
    }

    /// The output directory path, resolved against `base_path`.
    pub fn output_dir(&self, base_path: &Path) -> PathBuf {
        resolve(&self.output, base_path)
    }
}

fn resolve(path: &Path, base_path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "site:\n  name: Каталог ВУЗов\n";
        let config: CatalogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.site.name, "Каталог ВУЗов");
        assert_eq!(config.site.tagline, None);
        assert_eq!(config.input, PathBuf::from("catalog.md"));
        assert_eq!(config.output, PathBuf::from("pages"));
        assert_eq!(config.layout, Layout::Card);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
site:
  name: Каталог ВУЗов
  tagline: Путь к военной карьере
input: military_vuzes_table.md
output: vuz_pages
layout: table
"#;
        let config: CatalogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.input, PathBuf::from("military_vuzes_table.md"));
        assert_eq!(config.output, PathBuf::from("vuz_pages"));
        assert_eq!(config.layout, Layout::Table);
        assert_eq!(
            config.site.tagline.as_deref(),
            Some("Путь к военной карьере")
        );
    }

    #[test]
    fn test_path_resolution() {
        let yaml = "site:\n  name: Site\ninput: docs/catalog.md\noutput: /srv/pages\n";
        let config: CatalogConfig = serde_yaml::from_str(yaml).unwrap();
        let base = Path::new("/project");
        assert_eq!(
            config.input_path(base),
            PathBuf::from("/project/docs/catalog.md")
        );
        assert_eq!(config.output_dir(base), PathBuf::from("/srv/pages"));
    }

    #[test]
    fn test_layout_slug_separator() {
        assert_eq!(Layout::Card.slug_separator(), '-');
        assert_eq!(Layout::Table.slug_separator(), '_');
    }
}
