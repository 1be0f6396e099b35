use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Tag field a selector rule feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Album,
    Artist,
    Composer,
    Comment,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Album => "album",
            Field::Artist => "artist",
            Field::Composer => "composer",
            Field::Comment => "comment",
        }
    }
}

/// One row of the selector table: a structural location in the source page
/// and the tag field it feeds. A field served by several rows keeps the
/// first value that lands (the merge never overwrites); a location serving
/// two fields is written as two rows sharing one selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorRule {
    pub field: Field,
    /// CSS selector evaluated against the fetched page.
    pub selector: String,
    /// List-valued location (e.g. credit links): every match is normalized
    /// and survivors are joined with ", ".
    #[serde(default)]
    pub multi: bool,
}

/// Global configuration loaded from `~/.config/tagfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagfetchConfig {
    /// Directory (under the working directory) that tagged files move into.
    pub destination_dir: String,
    /// Audio file extensions to process, matched case-insensitively.
    pub audio_extensions: Vec<String>,
    /// User agent sent with page fetches.
    pub user_agent: String,
    /// Ordered selector table; defaults bind to the one supported page layout.
    #[serde(default = "default_selectors")]
    pub selectors: Vec<SelectorRule>,
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Header block of the supported page layout; every field except the
/// description lives under it.
const HEADER_BLOCK: &str =
    "body > main > div:nth-of-type(2) > div > div > div:nth-of-type(2) > div:nth-of-type(1)";

fn default_selectors() -> Vec<SelectorRule> {
    let rule = |field, selector: String, multi| SelectorRule {
        field,
        selector,
        multi,
    };
    vec![
        // The page's h1 feeds both title and album.
        rule(Field::Title, format!("{HEADER_BLOCK} > h1"), false),
        rule(Field::Album, format!("{HEADER_BLOCK} > h1"), false),
        // Series block first, then the first credit link; whichever yields a
        // value first becomes the artist.
        rule(
            Field::Artist,
            format!("{HEADER_BLOCK} > div:nth-of-type(1)"),
            false,
        ),
        rule(
            Field::Artist,
            format!("{HEADER_BLOCK} > div:nth-of-type(2) > a:nth-of-type(1)"),
            true,
        ),
        rule(
            Field::Composer,
            format!("{HEADER_BLOCK} > div:nth-of-type(2) > a:nth-of-type(2)"),
            true,
        ),
        rule(Field::Comment, "#title-description".to_string(), false),
    ]
}

impl Default for TagfetchConfig {
    fn default() -> Self {
        Self {
            destination_dir: "tagged_albums".to_string(),
            audio_extensions: vec!["mp3".to_string()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            selectors: default_selectors(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tagfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TagfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TagfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: TagfetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
