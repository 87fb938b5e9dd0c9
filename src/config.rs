//! Configuration for the shelf pipeline.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line overrides
//! 2. Environment variables (SHELF_CHANNEL, SHELF_API_BASE)
//! 3. Config file (.shelf/config.yaml)
//! 4. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .shelf/config.yaml
//! - Falls back to the user config directory (e.g. ~/.config/shelf/config.yaml)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.are.na/v2";
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_TARGET_ID: &str = "shelf";

pub const ENV_CHANNEL: &str = "SHELF_CHANNEL";
pub const ENV_API_BASE: &str = "SHELF_API_BASE";

/// Positional sizing applied to rendered blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutHints {
    /// First block is `bento-large`, later images are `bento-wide`
    #[default]
    Bento,
    /// Every block gets only the standard class
    None,
}

/// How text HTML is placed inside its container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextWrap {
    /// Wrap in a `<p>` element
    Paragraph,
    /// Insert the HTML as is
    #[default]
    Verbatim,
}

/// Sanitization policy for text block HTML
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextHtml {
    /// Insert producer HTML unchanged
    #[default]
    Trusted,
    /// Escape it so markup shows as literal text
    Escaped,
}

/// Renderer options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub layout_hints: LayoutHints,
    pub text_wrap: TextWrap,
    pub text_html: TextHtml,
}

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub channel: Option<String>,
    pub api_base: Option<String>,
    pub per_page: Option<u32>,
    pub target_id: Option<String>,
    #[serde(default)]
    pub render: Option<RenderConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    pub layout_hints: Option<LayoutHints>,
    pub text_wrap: Option<TextWrap>,
    pub text_html: Option<TextHtml>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub channel: Option<String>,
    pub api_base: Option<String>,
    pub per_page: Option<u32>,
    pub target_id: Option<String>,
    pub layout_hints: Option<LayoutHints>,
    pub text_wrap: Option<TextWrap>,
    pub text_html: Option<TextHtml>,
}

/// Fully resolved configuration handed to the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfConfig {
    /// Channel slug to fetch
    pub channel: String,
    /// API base URL without trailing slash
    pub api_base: String,
    /// Blocks requested per page
    pub per_page: u32,
    /// Id of the element the shelf is painted into
    pub target_id: String,
    pub render: RenderOptions,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ShelfConfig {
    /// Configuration for a channel with every other value defaulted
    pub fn for_channel(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            per_page: DEFAULT_PER_PAGE,
            target_id: DEFAULT_TARGET_ID.to_string(),
            render: RenderOptions::default(),
            config_file: None,
        }
    }

    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".shelf").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let user_config = dirs::config_dir()?.join("shelf").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge all sources into a resolved configuration
pub fn resolve_config(
    file: Option<(PathBuf, ConfigFile)>,
    env: impl Fn(&str) -> Option<String>,
    overrides: ConfigOverrides,
) -> Result<ShelfConfig> {
    let (config_file, file) = match file {
        Some((path, file)) => (Some(path), file),
        None => (None, ConfigFile::default()),
    };
    let render_file = file.render.unwrap_or_default();

    let channel = overrides
        .channel
        .or_else(|| env(ENV_CHANNEL))
        .or(file.channel)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .with_context(|| {
            format!(
                "No channel configured. Pass --channel, set {}, or add `channel:` to .shelf/config.yaml",
                ENV_CHANNEL
            )
        })?;

    let api_base = overrides
        .api_base
        .or_else(|| env(ENV_API_BASE))
        .or(file.api_base)
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string();

    let per_page = overrides
        .per_page
        .or(file.per_page)
        .unwrap_or(DEFAULT_PER_PAGE);
    if per_page == 0 {
        anyhow::bail!("per_page must be at least 1");
    }

    let target_id = overrides
        .target_id
        .or(file.target_id)
        .unwrap_or_else(|| DEFAULT_TARGET_ID.to_string());

    let render = RenderOptions {
        layout_hints: overrides
            .layout_hints
            .or(render_file.layout_hints)
            .unwrap_or_default(),
        text_wrap: overrides
            .text_wrap
            .or(render_file.text_wrap)
            .unwrap_or_default(),
        text_html: overrides
            .text_html
            .or(render_file.text_html)
            .unwrap_or_default(),
    };

    Ok(ShelfConfig {
        channel,
        api_base,
        per_page,
        target_id,
        render,
        config_file,
    })
}

/// Load configuration from all sources
pub fn load_config(overrides: ConfigOverrides) -> Result<ShelfConfig> {
    let file = match find_config_file() {
        Some(path) => {
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => None,
    };

    resolve_config(file, |key| std::env::var(key).ok(), overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_with_channel_override() {
        let config = resolve_config(
            None,
            no_env,
            ConfigOverrides {
                channel: Some("heura-murgui".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config, ShelfConfig::for_channel("heura-murgui"));
    }

    #[test]
    fn test_missing_channel_is_an_error() {
        let err = resolve_config(None, no_env, ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("No channel configured"));
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let shelf_dir = temp.path().join(".shelf");
        std::fs::create_dir_all(&shelf_dir).unwrap();

        let config_path = shelf_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
channel: from-file
per_page: 50
render:
  layout_hints: none
  text_wrap: paragraph
"#
        )
        .unwrap();

        let parsed = load_config_file(&config_path).unwrap();
        let config = resolve_config(
            Some((config_path.clone(), parsed)),
            no_env,
            ConfigOverrides::default(),
        )
        .unwrap();

        assert_eq!(config.channel, "from-file");
        assert_eq!(config.per_page, 50);
        assert_eq!(config.render.layout_hints, LayoutHints::None);
        assert_eq!(config.render.text_wrap, TextWrap::Paragraph);
        assert_eq!(config.render.text_html, TextHtml::Trusted);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_priority_order() {
        let file = ConfigFile {
            channel: Some("file-channel".to_string()),
            api_base: Some("https://file.example/v2".to_string()),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [
            (ENV_CHANNEL, "env-channel"),
            (ENV_API_BASE, "https://env.example/v2/"),
        ]
        .into_iter()
        .collect();
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let config = resolve_config(
            Some((PathBuf::from("/x/.shelf/config.yaml"), file.clone())),
            lookup,
            ConfigOverrides::default(),
        )
        .unwrap();
        assert_eq!(config.channel, "env-channel");
        assert_eq!(config.api_base, "https://env.example/v2");

        let config = resolve_config(
            Some((PathBuf::from("/x/.shelf/config.yaml"), file)),
            lookup,
            ConfigOverrides {
                channel: Some("cli-channel".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.channel, "cli-channel");
    }

    #[test]
    fn test_zero_per_page_rejected() {
        let result = resolve_config(
            None,
            no_env,
            ConfigOverrides {
                channel: Some("c".to_string()),
                per_page: Some(0),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }
}
