//! Remote callbacks shared by clone, fetch, ls-remote and push

use std::path::PathBuf;

use git2::{Cred, CredentialType, FetchOptions, PushOptions, RemoteCallbacks};
use tracing::debug;

/// Upper bound on credential callbacks per operation; libgit2 keeps asking
/// for as long as the callback keeps answering.
const MAX_CREDENTIAL_ATTEMPTS: usize = 5;

/// Private keys tried after the ssh agent, in order of preference
fn ssh_key_paths() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    ["id_ed25519", "id_rsa", "id_ecdsa"]
        .iter()
        .map(|name| home.join(".ssh").join(name))
        .filter(|path| path.exists())
        .collect()
}

/// Callbacks with credential lookup and per-reference push rejection
///
/// Credentials are tried in this order: ssh agent, `~/.ssh` keys, the git
/// credential helper, then libgit2 default credentials.
pub fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    let mut attempts = 0;

    callbacks.credentials(move |url, username_from_url, allowed_types| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str(&format!(
                "authentication failed for {}",
                url
            )));
        }
        debug!(url, attempt = attempts, ?allowed_types, "credentials requested");

        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            // first attempt goes to the agent, later ones walk the key files
            if attempts == 1 {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }
            let keys = ssh_key_paths();
            if let Some(key) = keys.get(attempts.saturating_sub(2)) {
                return Cred::ssh_key(username, None, key, None);
            }
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(config) = git2::Config::open_default() {
                if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
                    return Ok(cred);
                }
            }
        }

        Cred::default()
    });

    callbacks.push_update_reference(|refname, status| match status {
        Some(status) => Err(git2::Error::from_str(&format!(
            "remote rejected {}: {}",
            refname, status
        ))),
        None => Ok(()),
    });

    callbacks
}

pub fn fetch_options<'a>() -> FetchOptions<'a> {
    let mut options = FetchOptions::new();
    options.remote_callbacks(remote_callbacks());
    options
}

pub fn push_options<'a>() -> PushOptions<'a> {
    let mut options = PushOptions::new();
    options.remote_callbacks(remote_callbacks());
    options
}
