// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::{path::Path, process::Command};

/// Hand the installed key to the running ssh-agent. The agent picks up
/// the certificate from the adjacent `-cert.pub` file on its own.
pub fn add_key(key_path: &Path) -> Result<()> {
    let mut cmd = Command::new("ssh-add");
    cmd.arg(key_path);
    debug!("executing command: \"{:?}\"", cmd);

    let output = cmd.output().context("failed to run ssh-add")?;

    if !output.status.success() {
        warn!("ssh-add exited with status: {}", output.status);
        warn!("stderr: \"{}\"", String::from_utf8_lossy(&output.stderr));
        return Err(anyhow::anyhow!(
            "ssh-add failed with status {}",
            output.status
        ));
    }

    Ok(())
}
