// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Path component of the issuance endpoint.
pub const CREATE_PAIR: &str = "create_pair";

/// Suffix appended to the key path to name the certificate.
pub const CERT_SUFFIX: &str = "-cert.pub";

/// Key file name used when neither an output path nor a scope is given.
pub const DEFAULT_KEY_ID: &str = "keyfetch";

/// Configuration for a single issuance run, resolved from the command line
/// and environment by the binary before anything else happens.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Account name presented to the issuance service.
    pub username: String,

    /// Named credential profile. Selects the server side issuance policy
    /// and, absent an explicit output path, names the local key file.
    pub scope: Option<String>,

    /// Explicit path for the private key. The certificate always lands
    /// next to it.
    pub output: Option<PathBuf>,

    /// Host name (optionally `scheme://host`) of the issuance service.
    pub server: String,

    /// Hand the installed key to ssh-agent once the run succeeds.
    pub agent: bool,
}

impl Config {
    /// Final resting place for the private key: explicit output path,
    /// else `~/.ssh/{scope}`, else `~/.ssh/keyfetch`.
    pub fn key_path(&self) -> Result<PathBuf> {
        if let Some(output) = &self.output {
            return Ok(output.clone());
        }

        let home =
            dirs::home_dir().context("unable to determine home directory")?;
        let name = self.scope.as_deref().unwrap_or(DEFAULT_KEY_ID);

        Ok(home.join(".ssh").join(name))
    }

    /// Certificate path for a given key path. The suffix is appended to
    /// the full file name, it does not replace an extension.
    pub fn cert_path(key_path: &Path) -> PathBuf {
        let mut name = key_path.as_os_str().to_os_string();
        name.push(CERT_SUFFIX);

        PathBuf::from(name)
    }

    /// URL POSTed to when requesting a new key pair. A scheme prefix on
    /// the server name is honored, otherwise https is assumed. The scope
    /// is a path segment: the credentials never appear in the URL.
    pub fn endpoint_url(&self) -> String {
        let base = if self.server.starts_with("http://")
            || self.server.starts_with("https://")
        {
            self.server.clone()
        } else {
            format!("https://{}", self.server)
        };

        let mut url =
            format!("{}/{}/", base.trim_end_matches('/'), CREATE_PAIR);
        if let Some(scope) = &self.scope {
            url.push_str(scope);
            url.push('/');
        }

        url
    }
}
