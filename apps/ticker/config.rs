use crate::error::{Result, TickerError};
use serde::Deserialize;
use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

pub const DEFAULT_TICKER_DIR: &str = "/boot/config/plugins/user.scripts/scripts/News Ticker";
pub const CONFIG_FILE_NAME: &str = "news_ticker_config.json";
pub const STATE_FILE_NAME: &str = "news_ticker_state.json";

/// Identifier that arrives as either a JSON number or a JSON string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// Canonical string form of a forum topic id. Used both in URLs and as the
/// checkpoint key, so `42` and `"42"` in the config refer to the same topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawId")]
pub struct TopicId(String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<RawId> for TopicId {
    fn from(raw: RawId) -> Self {
        Self(raw.into())
    }
}

impl From<u64> for TopicId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickerConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_username: String,
    #[serde(deserialize_with = "deserialize_component_id")]
    pub component_id: String,
    pub topics: Vec<TopicId>,
}

fn deserialize_component_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

impl TickerConfig {
    pub fn from_json(path: &Path, contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|source| TickerError::ConfigInvalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads the config file. A missing file is reported as
    /// [`TickerError::ConfigMissing`] so the caller can bail before touching
    /// the network or the state file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TickerError::ConfigMissing {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(TickerError::ConfigIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::from_json(path, &contents)?;
        info!(
            base_url = %config.base_url,
            topics = config.topics.len(),
            "Loaded ticker config"
        );
        Ok(config)
    }
}

/// Where the config and state files live.
#[derive(Debug, Clone)]
pub struct TickerPaths {
    pub config: PathBuf,
    pub state: PathBuf,
}

impl TickerPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            config: dir.join(CONFIG_FILE_NAME),
            state: dir.join(STATE_FILE_NAME),
        }
    }

    /// `NEWS_TICKER_CONFIG` and `NEWS_TICKER_STATE` override the individual
    /// files; otherwise both live in `NEWS_TICKER_DIR`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let dir = var("NEWS_TICKER_DIR").unwrap_or_else(|| DEFAULT_TICKER_DIR.to_string());
        let mut paths = Self::in_dir(dir);
        if let Some(config) = var("NEWS_TICKER_CONFIG") {
            paths.config = PathBuf::from(config);
        }
        if let Some(state) = var("NEWS_TICKER_STATE") {
            paths.state = PathBuf::from(state);
        }
        debug!(
            config = %paths.config.display(),
            state = %paths.state.display(),
            "Resolved paths"
        );
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<TickerConfig> {
        TickerConfig::from_json(Path::new("test.json"), json)
    }

    #[test]
    fn topic_ids_are_canonicalized_to_strings() {
        let config = parse(
            r#"{
                "base_url": "https://forum.example.com",
                "api_key": "k",
                "api_username": "system",
                "component_id": 12,
                "topics": [42, "77"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.topics, vec![TopicId::new("42"), TopicId::new("77")]);
        assert_eq!(config.component_id, "12");
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = parse(
            r#"{
                "base_url": "https://forum.example.com",
                "api_username": "system",
                "component_id": "12",
                "topics": []
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, TickerError::ConfigInvalid { .. }));
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn missing_file_is_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = TickerConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TickerError::ConfigMissing { .. }));
    }

    #[test]
    fn paths_in_dir() {
        let paths = TickerPaths::in_dir("/tmp/ticker");
        assert_eq!(paths.config, Path::new("/tmp/ticker/news_ticker_config.json"));
        assert_eq!(paths.state, Path::new("/tmp/ticker/news_ticker_state.json"));
    }

    fn paths_from(vars: &[(&str, &str)]) -> TickerPaths {
        TickerPaths::from_vars(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        })
    }

    #[test]
    fn paths_default_to_the_scripts_dir() {
        let paths = paths_from(&[]);
        assert_eq!(paths.config, Path::new(DEFAULT_TICKER_DIR).join(CONFIG_FILE_NAME));
        assert_eq!(paths.state, Path::new(DEFAULT_TICKER_DIR).join(STATE_FILE_NAME));
    }

    #[test]
    fn file_overrides_take_precedence_over_dir() {
        let paths = paths_from(&[
            ("NEWS_TICKER_DIR", "/srv/ticker"),
            ("NEWS_TICKER_CONFIG", "/etc/ticker.json"),
        ]);
        assert_eq!(paths.config, Path::new("/etc/ticker.json"));
        assert_eq!(paths.state, Path::new("/srv/ticker/news_ticker_state.json"));

        let paths = paths_from(&[
            ("NEWS_TICKER_STATE", "/var/lib/ticker.json"),
            ("NEWS_TICKER_DIR", "/srv/ticker"),
        ]);
        assert_eq!(paths.config, Path::new("/srv/ticker/news_ticker_config.json"));
        assert_eq!(paths.state, Path::new("/var/lib/ticker.json"));
    }
}
