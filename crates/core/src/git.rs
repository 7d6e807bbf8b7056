//! Git configuration access
//!
//! The provisioner writes git settings through the [`GitConfigStore`] trait so
//! the credential logic can be exercised against an in-memory store. The
//! production implementation, [`GitCli`], shells out to `git config` against
//! either the user's global configuration or an explicit file.

use crate::errors::{GitError, Result};
use std::path::PathBuf;
use std::process::{Command, Output};
use tracing::{debug, instrument};

/// Exit code of `git config` when a key or pattern matched nothing
const GIT_CONFIG_NOTHING_FOUND: i32 = 1;
/// Exit code of `git config --unset-all` when the key does not exist
const GIT_CONFIG_NO_SUCH_KEY: i32 = 5;

/// Key/value store over git configuration
pub trait GitConfigStore {
    /// Set `key` to `value`, replacing every existing value of the key
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// All `(key, value)` entries whose key matches the regular expression
    fn get_regexp(&self, pattern: &str) -> Result<Vec<(String, String)>>;

    /// Remove every value of `key`; a missing key is not an error
    fn unset_all(&self, key: &str) -> Result<()>;
}

/// Which configuration file `git config` operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitScope {
    /// `--global` (the user's `~/.gitconfig`)
    Global,
    /// `--file <path>`
    File(PathBuf),
}

/// `git config` through the git binary
#[derive(Debug, Clone)]
pub struct GitCli {
    git_path: String,
    scope: GitScope,
}

impl GitCli {
    /// Operate on the global configuration with `git` from PATH
    pub fn global() -> Self {
        Self {
            git_path: "git".to_string(),
            scope: GitScope::Global,
        }
    }

    /// Operate on a specific configuration file
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            git_path: "git".to_string(),
            scope: GitScope::File(path.into()),
        }
    }

    pub fn with_git_path(mut self, git_path: impl Into<String>) -> Self {
        self.git_path = git_path.into();
        self
    }

    /// Check that the git binary is available
    pub fn check_git_installed(&self) -> Result<()> {
        match Command::new(&self.git_path).arg("--version").output() {
            Ok(output) if output.status.success() => Ok(()),
            _ => Err(GitError::NotInstalled.into()),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let mut command = Command::new(&self.git_path);
        command.arg("config");
        match &self.scope {
            GitScope::Global => {
                command.arg("--global");
            }
            GitScope::File(path) => {
                command.arg("--file").arg(path);
            }
        }
        command.args(args);

        command.output().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => GitError::NotInstalled.into(),
            _ => GitError::CLIError(format!("Failed to execute git config: {}", e)).into(),
        })
    }

    fn failure(output: &Output) -> GitError {
        let stderr = String::from_utf8_lossy(&output.stderr);
        GitError::CLIError(format!(
            "git config exited with {}: {}",
            output.status.code().unwrap_or(-1),
            stderr.trim()
        ))
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::global()
    }
}

impl GitConfigStore for GitCli {
    // Keys of URL rewrites embed credentials
    #[instrument(skip_all)]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let output = self.run(&["--replace-all", key, value])?;
        if !output.status.success() {
            return Err(Self::failure(&output).into());
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn get_regexp(&self, pattern: &str) -> Result<Vec<(String, String)>> {
        let output = self.run(&["--get-regexp", pattern])?;
        if output.status.code() == Some(GIT_CONFIG_NOTHING_FOUND) {
            debug!("No git config entries matched");
            return Ok(Vec::new());
        }
        if !output.status.success() {
            return Err(Self::failure(&output).into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_entries(&stdout))
    }

    #[instrument(skip_all)]
    fn unset_all(&self, key: &str) -> Result<()> {
        let output = self.run(&["--unset-all", key])?;
        match output.status.code() {
            Some(0) | Some(GIT_CONFIG_NO_SUCH_KEY) => Ok(()),
            _ => Err(Self::failure(&output).into()),
        }
    }
}

/// Parse `--get-regexp` output: one `key value` pair per line
fn parse_entries(stdout: &str) -> Vec<(String, String)> {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(' ') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}

pub mod mock {
    //! In-memory git configuration store

    use super::GitConfigStore;
    use crate::errors::{GitError, Result};
    use regex::Regex;
    use std::sync::{Arc, Mutex};

    /// Git configuration held in memory, with a write counter
    ///
    /// Keys are stored lowercased, the way `git config --get-regexp` reports
    /// section and variable names, and patterns match against that form.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryGitConfig {
        entries: Arc<Mutex<Vec<(String, String)>>>,
        writes: Arc<Mutex<usize>>,
        fail_writes: Arc<Mutex<bool>>,
        fail_unsets: Arc<Mutex<bool>>,
    }

    impl MemoryGitConfig {
        pub fn new() -> Self {
            Self::default()
        }

        /// Insert an entry without counting it as a write
        pub fn seed(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .push((key.to_lowercase(), value.to_string()));
        }

        /// Make every subsequent write fail
        pub fn fail_writes(&self, fail: bool) {
            *self.fail_writes.lock().unwrap() = fail;
        }

        /// Make every subsequent unset fail, leaving sets working
        pub fn fail_unsets(&self, fail: bool) {
            *self.fail_unsets.lock().unwrap() = fail;
        }

        /// First value of `key`
        pub fn get(&self, key: &str) -> Option<String> {
            let key = key.to_lowercase();
            self.entries
                .lock()
                .unwrap()
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
        }

        pub fn entries(&self) -> Vec<(String, String)> {
            self.entries.lock().unwrap().clone()
        }

        /// Number of set/unset calls made
        pub fn write_count(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        fn begin_write(&self, key: &str) -> Result<()> {
            if *self.fail_writes.lock().unwrap() {
                let message = format!("could not lock config for {}", key);
                return Err(GitError::CLIError(message).into());
            }
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }

    impl GitConfigStore for MemoryGitConfig {
        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.begin_write(key)?;
            let key = key.to_lowercase();
            let mut entries = self.entries.lock().unwrap();
            entries.retain(|(k, _)| *k != key);
            entries.push((key, value.to_string()));
            Ok(())
        }

        fn get_regexp(&self, pattern: &str) -> Result<Vec<(String, String)>> {
            let regex = Regex::new(pattern)
                .map_err(|e| GitError::CLIError(format!("invalid key pattern: {}", e)))?;
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|(k, _)| regex.is_match(k))
                .cloned()
                .collect())
        }

        fn unset_all(&self, key: &str) -> Result<()> {
            self.begin_write(key)?;
            let key = key.to_lowercase();
            if *self.fail_unsets.lock().unwrap() {
                return Err(GitError::CLIError(format!("could not unset {}", key)).into());
            }
            self.entries.lock().unwrap().retain(|(k, _)| *k != key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MemoryGitConfig;
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        GitCli::global().check_git_installed().is_ok()
    }

    #[test]
    fn test_parse_entries() {
        let entries = parse_entries(
            "user.name Ada Lovelace\nurl.https://x@github.com/.insteadof https://github.com/\n",
        );
        assert_eq!(
            entries,
            vec![
                ("user.name".to_string(), "Ada Lovelace".to_string()),
                (
                    "url.https://x@github.com/.insteadof".to_string(),
                    "https://github.com/".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_memory_store_set_replaces() {
        let store = MemoryGitConfig::new();
        store.set("user.name", "first").unwrap();
        store.set("User.Name", "second").unwrap();
        assert_eq!(store.get("user.name").as_deref(), Some("second"));
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_memory_store_regexp() {
        let store = MemoryGitConfig::new();
        store.seed("url.https://a@github.com/.insteadOf", "https://github.com/");
        store.seed("url.ssh://git@gitlab.com/.insteadOf", "https://gitlab.com/");
        store.seed("user.name", "dev");

        let found = store.get_regexp("^url\\..*\\.insteadof$").unwrap();
        assert_eq!(found.len(), 2);
        assert!(store.get_regexp("^user\\.").unwrap().len() == 1);
    }

    #[test]
    fn test_cli_file_scope_roundtrip() {
        if !git_available() {
            eprintln!("git not available, skipping");
            return;
        }

        let dir = TempDir::new().unwrap();
        let store = GitCli::with_file(dir.path().join("gitconfig"));

        assert!(store.get_regexp("^user\\.").unwrap().is_empty());
        store.unset_all("user.name").unwrap();

        store.set("user.name", "Ada Lovelace").unwrap();
        store.set("user.name", "Grace Hopper").unwrap();
        store
            .set("url.https://x-access-token:t@github.com/.insteadOf", "https://github.com/")
            .unwrap();

        let users = store.get_regexp("^user\\.").unwrap();
        assert_eq!(
            users,
            vec![("user.name".to_string(), "Grace Hopper".to_string())]
        );

        let rewrites = store.get_regexp("^url\\..*\\.insteadof$").unwrap();
        assert_eq!(rewrites.len(), 1);
        store.unset_all(&rewrites[0].0).unwrap();
        assert!(store.get_regexp("^url\\.").unwrap().is_empty());
    }

    #[test]
    fn test_cli_missing_binary() {
        let store = GitCli::global().with_git_path("/nonexistent/git-binary");
        assert!(matches!(
            store.check_git_installed(),
            Err(crate::errors::SailError::Git(GitError::NotInstalled))
        ));
        assert!(store.set("user.name", "x").is_err());
    }
}
