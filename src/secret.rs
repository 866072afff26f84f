// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Result;
use zeroize::Zeroizing;

/// Source of the password+OTP secret. The orchestrator only sees this
/// trait; the binary plugs in the interactive tty reader, tests plug in
/// canned values.
pub trait PasswordReader {
    fn read(&mut self, prompt: &str) -> Result<Zeroizing<String>>;
}

/// Interactive reader. `rpassword` disables tty echo for the duration of
/// the read and restores it on every return path, including errors, via
/// its own drop guard.
#[derive(Default)]
pub struct StdioPasswordReader {}

impl PasswordReader for StdioPasswordReader {
    fn read(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        Ok(Zeroizing::new(rpassword::prompt_password(prompt)?))
    }
}

/// Prompt shown for the one secret capture of a run.
pub fn prompt_for(username: &str) -> String {
    format!("Password + OTP for {}: ", username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_account() {
        assert_eq!(prompt_for("ann"), "Password + OTP for ann: ");
    }
}
