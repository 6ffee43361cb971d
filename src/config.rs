use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard ceiling for `max_nesting_depth`.
pub const MAX_NESTING_LIMIT: usize = 256;

/// Default recursion ceiling for quotes, lists and inline nesting.
pub const DEFAULT_NESTING_DEPTH: usize = 32;

/// Errors raised while building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_nesting_depth must be between 1 and {MAX_NESTING_LIMIT}, got {0}")]
    NestingDepth(usize),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Preset that decides which token kinds are enabled by default.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Every block and span kind, including tables, strikethrough and raw HTML
    #[default]
    Standard,
    /// Standard minus tables and strikethrough
    CommonMark,
    /// Paragraphs, headings, lists, quotes, code, emphasis, code spans and links
    Minimal,
}

/// Enabled token kinds. A disabled block kind falls through to a paragraph;
/// a disabled span kind stays plain text.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Extensions {
    // ===== Block kinds =====
    /// `#` headings
    pub atx_headings: bool,
    /// Headings underlined with `===` or `---`
    pub setext_headings: bool,
    /// `>` quotes
    pub block_quotes: bool,
    /// ``` and ~~~ fences
    pub fenced_code: bool,
    /// Code indented by four spaces
    pub indented_code: bool,
    /// `***`, `---`, `___`
    pub thematic_breaks: bool,
    /// Bullet and ordered lists
    pub lists: bool,
    /// Pipe tables with optional delimiter row
    pub tables: bool,
    /// `[label]: url "title"` definitions
    pub reference_definitions: bool,
    /// Raw HTML blocks
    pub html_blocks: bool,

    // ===== Span kinds =====
    /// `*a*`, `_a_`, `**a**`, `__a__`
    pub emphasis: bool,
    /// `~~a~~`
    pub strikethrough: bool,
    /// Backtick code spans
    pub code_spans: bool,
    /// Inline and reference links
    pub links: bool,
    /// Inline and reference images
    pub images: bool,
    /// `<https://...>` and `<user@host>`
    pub autolinks: bool,
    /// Backslash escapes of ASCII punctuation
    pub escapes: bool,
    /// Inline HTML tags and comments
    pub html_spans: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Self::for_flavor(Flavor::default())
    }
}

impl Extensions {
    /// Get the default extension set for a given flavor.
    pub fn for_flavor(flavor: Flavor) -> Self {
        match flavor {
            Flavor::Standard => Self::standard_defaults(),
            Flavor::CommonMark => Self::commonmark_defaults(),
            Flavor::Minimal => Self::minimal_defaults(),
        }
    }

    fn standard_defaults() -> Self {
        Self {
            atx_headings: true,
            setext_headings: true,
            block_quotes: true,
            fenced_code: true,
            indented_code: true,
            thematic_breaks: true,
            lists: true,
            tables: true,
            reference_definitions: true,
            html_blocks: true,

            emphasis: true,
            strikethrough: true,
            code_spans: true,
            links: true,
            images: true,
            autolinks: true,
            escapes: true,
            html_spans: true,
        }
    }

    fn commonmark_defaults() -> Self {
        Self {
            tables: false,
            strikethrough: false,
            ..Self::standard_defaults()
        }
    }

    fn minimal_defaults() -> Self {
        Self {
            setext_headings: false,
            indented_code: false,
            thematic_breaks: false,
            tables: false,
            reference_definitions: false,
            html_blocks: false,
            strikethrough: false,
            images: false,
            autolinks: false,
            html_spans: false,
            ..Self::standard_defaults()
        }
    }
}

/// Span tokenizer variant.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InlineMode {
    /// Delimiter stack with flanking rules
    #[default]
    DelimiterStack,
    /// Regex-anchored fallback; faster, lower fidelity
    Simple,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub flavor: Flavor,
    pub extensions: Extensions,
    pub inline_mode: InlineMode,
    pub max_nesting_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        let flavor = Flavor::default();
        Self {
            flavor,
            extensions: Extensions::for_flavor(flavor),
            inline_mode: InlineMode::default(),
            max_nesting_depth: DEFAULT_NESTING_DEPTH,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nesting_depth == 0 || self.max_nesting_depth > MAX_NESTING_LIMIT {
            return Err(ConfigError::NestingDepth(self.max_nesting_depth));
        }
        Ok(())
    }

    /// Depth ceiling clamped into the supported range.
    pub fn nesting_depth(&self) -> usize {
        self.max_nesting_depth.clamp(1, MAX_NESTING_LIMIT)
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Switches flavor and resets extensions to that flavor's defaults.
    pub fn flavor(mut self, flavor: Flavor) -> Self {
        self.config.flavor = flavor;
        self.config.extensions = Extensions::for_flavor(flavor);
        self
    }

    pub fn extensions(mut self, extensions: Extensions) -> Self {
        self.config.extensions = extensions;
        self
    }

    pub fn inline_mode(mut self, mode: InlineMode) -> Self {
        self.config.inline_mode = mode;
        self
    }

    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

const CANDIDATE_NAMES: &[&str] = &[".sprig.toml", "sprig.toml"];

/// Parses a config file body. Extensions not named in the file take the
/// defaults of the file's flavor.
fn parse_config_str(s: &str, path: &Path) -> Result<Config, ConfigError> {
    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let mut table: toml::Table = toml::from_str(s).map_err(|e| parse_error(e.to_string()))?;

    let flavor = match table.get("flavor") {
        Some(value) => value
            .clone()
            .try_into::<Flavor>()
            .map_err(|e| parse_error(e.to_string()))?,
        None => Flavor::default(),
    };

    let mut merged = match toml::Value::try_from(Extensions::for_flavor(flavor)) {
        Ok(toml::Value::Table(defaults)) => defaults,
        Ok(_) => toml::Table::new(),
        Err(e) => return Err(parse_error(e.to_string())),
    };
    if let Some(toml::Value::Table(overrides)) = table.remove("extensions") {
        merged.extend(overrides);
    }
    table.insert("extensions".to_string(), toml::Value::Table(merged));

    let config = toml::Value::Table(table)
        .try_into::<Config>()
        .map_err(|e| parse_error(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("sprig").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("sprig")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .sprig.toml, sprig.toml
/// 3) XDG: $XDG_CONFIG_HOME/sprig/config.toml or ~/.config/sprig/config.toml
/// 4) default config
pub fn load(
    explicit: Option<&Path>,
    start_dir: &Path,
) -> Result<(Config, Option<PathBuf>), ConfigError> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    if let Some(p) = xdg_config_path() {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        // Keys are snake_case; "inline-mode" is unknown and ignored.
        let cfg = parse_config_str("inline-mode = \"simple\"", Path::new("x.toml")).unwrap();
        assert_eq!(cfg.max_nesting_depth, DEFAULT_NESTING_DEPTH);
        assert_eq!(cfg.inline_mode, InlineMode::DelimiterStack);
    }

    #[test]
    fn test_flavor_sets_extension_defaults() {
        let cfg = parse_config_str("flavor = \"minimal\"", Path::new("x.toml")).unwrap();
        assert_eq!(cfg.flavor, Flavor::Minimal);
        assert!(!cfg.extensions.tables);
        assert!(cfg.extensions.emphasis);
    }

    #[test]
    fn test_extension_overrides_merge_with_flavor() {
        let src = r#"
            flavor = "commonmark"
            inline_mode = "simple"

            [extensions]
            tables = true
        "#;
        let cfg = parse_config_str(src, Path::new("x.toml")).unwrap();
        assert!(cfg.extensions.tables);
        assert!(!cfg.extensions.strikethrough);
        assert_eq!(cfg.inline_mode, InlineMode::Simple);
    }

    #[test]
    fn test_invalid_depth_rejected() {
        let err = parse_config_str("max_nesting_depth = 0", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NestingDepth(0)));

        let err = ConfigBuilder::default()
            .max_nesting_depth(MAX_NESTING_LIMIT + 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NestingDepth(_)));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = parse_config_str("flavor = ", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_load_finds_config_in_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".sprig.toml"), "flavor = \"commonmark\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let (cfg, path) = load(None, &nested).unwrap();
        assert_eq!(cfg.flavor, Flavor::CommonMark);
        assert_eq!(path, Some(dir.path().join(".sprig.toml")));
    }

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
