//! Config file watching for live route reloads.
//!
//! Editors often emit several events per save, so a reload is only sent
//! when the file content differs from the last accepted version.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{parse_config, ConfigError};
use crate::config::schema::ConsoleConfig;

/// What a single file event led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Not a write to the file.
    Ignored,
    /// Same content as the last accepted config.
    Unchanged,
    /// A validated config went out on the channel.
    Sent,
    /// The file was unreadable or invalid; nothing was sent.
    Rejected,
}

/// Sends a validated config for every accepted change of `path`.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ConsoleConfig>,
    last_accepted: Mutex<Option<String>>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for validated configs.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ConsoleConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
            last_accepted: Mutex::new(None),
        };
        (watcher, update_rx)
    }

    /// Seed the last accepted content so the first event for an unchanged
    /// file is not sent again.
    pub fn with_current(self, content: impl Into<String>) -> Self {
        if let Ok(mut last) = self.last_accepted.lock() {
            *last = Some(content.into());
        }
        self
    }

    /// React to one notify event.
    pub fn handle(&self, event: notify::Result<Event>) -> ReloadOutcome {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(error = ?e, "Watch error");
                return ReloadOutcome::Ignored;
            }
        };
        if !(event.kind.is_modify() || event.kind.is_create()) {
            return ReloadOutcome::Ignored;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(path = ?self.path, error = %ConfigError::from(e), "Failed to read config");
                return ReloadOutcome::Rejected;
            }
        };

        let Ok(mut last) = self.last_accepted.lock() else {
            return ReloadOutcome::Rejected;
        };
        if last.as_deref() == Some(content.as_str()) {
            return ReloadOutcome::Unchanged;
        }

        match parse_config(&content) {
            Ok(config) => {
                tracing::info!(path = ?self.path, "Config file changed, reloading");
                if self.update_tx.send(config).is_err() {
                    tracing::warn!("Config receiver dropped, reload discarded");
                    return ReloadOutcome::Rejected;
                }
                *last = Some(content);
                ReloadOutcome::Sent
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to reload config, keeping current routes");
                ReloadOutcome::Rejected
            }
        }
    }

    /// Start watching the file. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                self.handle(res);
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}
