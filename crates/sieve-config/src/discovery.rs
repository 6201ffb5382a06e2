//! Configuration file discovery.
//!
//! Walks up the directory tree from a starting point collecting `.sieve.toml` files, then
//! picks up the global `~/.sieve.toml` unless a `root = true` file ended the walk.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".sieve.toml";

/// Where the upward walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEnd {
    /// A file with `root = true`. The global file is not consulted.
    RootConfig(PathBuf),
    /// The top of the filesystem.
    FilesystemRoot,
}

/// Configuration files that apply to a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// Files found on the walk, closest first.
    pub local: Vec<PathBuf>,
    /// `~/.sieve.toml`, when it exists, was not already found on the walk, and no root
    /// config ended the walk.
    pub global: Option<PathBuf>,
    /// Why the walk stopped.
    pub walk_end: WalkEnd,
}

impl Discovery {
    /// Walks up from `cwd` and looks for the global file.
    pub fn from_dir(cwd: &Path) -> Self {
        let mut local = Vec::new();
        let walk_end = cwd
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .filter(|path| path.is_file())
            .find_map(|path| {
                let is_root = is_root_config(&path);
                local.push(path.clone());
                is_root.then_some(WalkEnd::RootConfig(path))
            })
            .unwrap_or(WalkEnd::FilesystemRoot);

        let global = match walk_end {
            WalkEnd::RootConfig(_) => None,
            WalkEnd::FilesystemRoot => global_config_path()
                .filter(|path| path.is_file() && !local.contains(path)),
        };

        Self {
            local,
            global,
            walk_end,
        }
    }

    /// Returns every file in precedence order: closest first, global last.
    pub fn files(&self) -> Vec<PathBuf> {
        self.local.iter().chain(&self.global).cloned().collect()
    }

    /// Returns true if no file applies.
    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.global.is_none()
    }
}

/// Returns the path of the global configuration file (`~/.sieve.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}
