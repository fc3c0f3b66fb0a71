use crate::{
    config::TopicId,
    error::{Result, TickerError},
    headline::HeadlineItem,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Highest post number already accounted for, keyed by topic id string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checkpoints(BTreeMap<String, u64>);

impl Checkpoints {
    /// 0 for a topic never seen before.
    pub fn get(&self, topic: &TopicId) -> u64 {
        self.0.get(topic.as_str()).copied().unwrap_or(0)
    }

    /// Raises the checkpoint to `post_number`; never lowers it.
    pub fn advance(&mut self, topic: &TopicId, post_number: u64) {
        let entry = self.0.entry(topic.as_str().to_string()).or_insert(0);
        *entry = (*entry).max(post_number);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything that survives between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerState {
    pub last_seen: Checkpoints,
    pub marquee: Vec<HeadlineItem>,
}

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a first run and yields empty state.
    pub fn load(&self) -> Result<TickerState> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No state file, starting fresh");
                return Ok(TickerState::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let state: TickerState =
            serde_json::from_str(&contents).map_err(|source| TickerError::StateCorrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            topics = state.last_seen.len(),
            marquee = state.marquee.len(),
            "Loaded state"
        );
        Ok(state)
    }

    /// Replaces the state file as a whole: the record is written to a temp
    /// file in the same directory, synced, then renamed over the target.
    pub fn save(&self, state: &TickerState) -> Result<()> {
        let json = serde_json::to_string_pretty(state).map_err(|source| {
            TickerError::StateCorrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        write_atomically(&self.path, json.as_bytes()).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), "Saved state");
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> TickerError {
        TickerError::StateIo {
            path: self.path.clone(),
            source,
        }
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
