//! Credential provisioning for the container entrypoint
//!
//! Reads the environment credential set and applies it to the container's
//! git configuration:
//!
//! 1. Git identity (`user.name`, `user.email`) when both values are present.
//! 2. GitHub token: a `store` credential helper backed by a `0600`
//!    credentials file, plus a URL rewrite that upgrades anonymous
//!    `https://github.com/` remotes to authenticated ones.
//! 3. Service secrets (Supabase): reported as available, never validated.
//!
//! Every step is optional and every write overwrites instead of appending, so
//! running the provisioner on each container start converges to the same
//! configuration. Failures are collected as warnings; none of them stop the
//! entrypoint from handing over to the requested command.

use crate::errors::{ProvisionError, Result, SailError};
use crate::git::GitConfigStore;
use crate::redaction::{mask_url_userinfo, SecretRegistry};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Git author name
pub const ENV_GIT_USER_NAME: &str = "GITHUB_USER_NAME";
/// Git author email
pub const ENV_GIT_USER_EMAIL: &str = "GITHUB_USER_EMAIL";
/// GitHub personal access token
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Supabase project URL
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
/// Supabase API key
pub const ENV_SUPABASE_KEY: &str = "SUPABASE_KEY";
/// Set to `1` to skip provisioning entirely
pub const ENV_PROVISION_SKIP: &str = "SAIL_PROVISION_SKIP";

/// Credentials file written under the home directory
pub const CREDENTIALS_FILE_NAME: &str = ".git-credentials";

const GITHUB_HOST: &str = "github.com";
const GITHUB_PREFIX: &str = "https://github.com/";
/// Username GitHub accepts for token authentication
const TOKEN_USER_FALLBACK: &str = "x-access-token";
const URL_REWRITE_PATTERN: &str = r"^url\..*\.insteadof$";

/// Credentials read from the container environment
///
/// Empty values count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub github_token: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "****");
        f.debug_struct("CredentialSet")
            .field("user_name", &self.user_name)
            .field("user_email", &self.user_email)
            .field("github_token", &redacted(&self.github_token))
            .field("supabase_url", &self.supabase_url.is_some())
            .field("supabase_key", &redacted(&self.supabase_key))
            .finish()
    }
}

impl CredentialSet {
    /// Read from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read from an explicit variable map
    pub fn from_map(env: &HashMap<String, String>) -> Self {
        Self::from_lookup(|key| env.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            user_name: get(ENV_GIT_USER_NAME),
            user_email: get(ENV_GIT_USER_EMAIL),
            github_token: get(ENV_GITHUB_TOKEN),
            supabase_url: get(ENV_SUPABASE_URL),
            supabase_key: get(ENV_SUPABASE_KEY),
        }
    }

    /// Whether no credential variable is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Register secret values so they are redacted from log output
    pub fn register_secrets(&self, registry: &SecretRegistry) {
        for secret in [&self.github_token, &self.supabase_key].into_iter().flatten() {
            registry.add_secret(secret);
        }
    }

    /// Username embedded in authenticated GitHub URLs
    fn github_user(&self) -> &str {
        self.user_name.as_deref().unwrap_or(TOKEN_USER_FALLBACK)
    }
}

/// Outcome of [`apply_credentials`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// `user.name` and `user.email` were written
    pub identity_configured: bool,
    /// Credential store and URL rewrite were written
    pub token_configured: bool,
    /// Service URL and key are both present
    pub services_available: bool,
    /// Non-fatal failures, with secrets redacted
    pub warnings: Vec<String>,
}

/// Apply the credential set to git configuration under `home`
///
/// `home` is the directory receiving the credentials file; `None` skips the
/// token step with a warning.
#[instrument(skip_all)]
pub fn apply_credentials<G: GitConfigStore>(
    credentials: &CredentialSet,
    git: &G,
    home: Option<&Path>,
    registry: &SecretRegistry,
) -> ProvisionReport {
    credentials.register_secrets(registry);
    let mut report = ProvisionReport::default();
    let record = |step: &str, err: SailError| {
        // Stale rewrite keys carry tokens the registry has never seen
        let message = mask_url_userinfo(&registry.redact_text(&format!("{}: {}", step, err)));
        warn!("{}", message);
        message
    };

    match (&credentials.user_name, &credentials.user_email) {
        (Some(name), Some(email)) => match configure_identity(git, name, email) {
            Ok(()) => {
                info!("Configured git identity for {}", name);
                report.identity_configured = true;
            }
            Err(e) => report.warnings.push(record("git identity", e)),
        },
        _ => debug!("Git identity variables incomplete, skipping"),
    }

    if let Some(token) = &credentials.github_token {
        let result = home
            .ok_or(SailError::from(ProvisionError::NoHome))
            .and_then(|home| configure_token(git, home, credentials.github_user(), token));
        match result {
            Ok(path) => {
                info!("Configured GitHub credentials in {}", path.display());
                report.token_configured = true;
            }
            Err(e) => report.warnings.push(record("GitHub credentials", e)),
        }
    } else {
        debug!("{} not set, skipping GitHub credentials", ENV_GITHUB_TOKEN);
    }

    if credentials.supabase_url.is_some() && credentials.supabase_key.is_some() {
        info!("Supabase credentials available");
        report.services_available = true;
    }

    report
}

fn configure_identity<G: GitConfigStore>(git: &G, name: &str, email: &str) -> Result<()> {
    git.set("user.name", name)?;
    git.set("user.email", email)
}

/// Write the credential store and URL rewrite, returning the store path
fn configure_token<G: GitConfigStore>(
    git: &G,
    home: &Path,
    user: &str,
    token: &str,
) -> Result<PathBuf> {
    let path = home.join(CREDENTIALS_FILE_NAME);
    write_credentials_file(&path, user, token)?;
    git.set("credential.helper", &store_helper(&path))?;
    apply_url_rewrite(git, user, token)?;
    Ok(path)
}

/// `credential.helper` value for a store file
///
/// Git hands helper strings to the shell, so the path is quoted.
fn store_helper(path: &Path) -> String {
    format!(
        "store --file {}",
        shell_words::quote(&path.display().to_string())
    )
}

/// Replace every rewrite of the anonymous GitHub prefix with one
/// authenticated rule
fn apply_url_rewrite<G: GitConfigStore>(git: &G, user: &str, token: &str) -> Result<()> {
    for (key, value) in git.get_regexp(URL_REWRITE_PATTERN)? {
        if value == GITHUB_PREFIX {
            git.unset_all(&key)?;
        }
    }

    let base = format!("{}/", github_url(user, token));
    git.set(&format!("url.{}.insteadOf", base), GITHUB_PREFIX)
}

fn github_url(user: &str, token: &str) -> String {
    format!(
        "https://{}:{}@{}",
        urlencoding::encode(user),
        urlencoding::encode(token),
        GITHUB_HOST
    )
}

/// Host of a credential-store line (`scheme://[userinfo@]host[:port][/path]`)
fn entry_host(line: &str) -> Option<&str> {
    let (_, rest) = line.trim().split_once("://")?;
    let authority = rest.split('/').next().unwrap_or(rest);
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    Some(host_port.split(':').next().unwrap_or(host_port))
}

/// Rewrite the credentials file with exactly one `github.com` entry
///
/// Entries for other hosts are kept in their original order. The file is
/// replaced atomically and ends up with mode `0600`.
pub fn write_credentials_file(path: &Path, user: &str, token: &str) -> Result<()> {
    let store_error = |source| ProvisionError::CredentialStore {
        path: path.display().to_string(),
        source,
    };

    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(store_error(e).into()),
    };

    let entry = github_url(user, token);
    let mut lines: Vec<&str> = existing
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !entry_host(line).is_some_and(|h| h.eq_ignore_ascii_case(GITHUB_HOST)))
        .collect();
    lines.push(&entry);

    let mut content = lines.join("\n");
    content.push('\n');

    write_private_atomic(path, content.as_bytes()).map_err(store_error)?;
    debug!("Wrote {} credential entries", lines.len());
    Ok(())
}

fn write_private_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| CREDENTIALS_FILE_NAME.to_string());
    let temp_path = path.with_file_name(format!(".{}.tmp-{}", file_name, std::process::id()));

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let result = (|| {
        let mut file = options.open(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600))?;
        }
        fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}
