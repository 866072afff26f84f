// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{Local, TimeZone};
use log::warn;
use ssh_key::Certificate;
use std::{fs, path::Path};

/// Human-readable validity window for the installed certificate, or
/// `None` when the file can't be read or parsed. Purely informational:
/// by the time this runs the credential is installed, so nothing here is
/// allowed to fail the run.
pub fn validity(cert_path: &Path) -> Option<String> {
    let text = match fs::read_to_string(cert_path) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "unable to read certificate {}: {}",
                cert_path.display(),
                e
            );
            return None;
        }
    };

    let line = text.lines().find(|l| !l.trim().is_empty())?;
    let cert = match Certificate::from_openssh(line) {
        Ok(cert) => cert,
        Err(e) => {
            warn!(
                "unable to parse certificate {}: {}",
                cert_path.display(),
                e
            );
            return None;
        }
    };

    Some(window(cert.valid_after(), cert.valid_before()))
}

// OpenSSH encodes "no bound" as 0 / u64::MAX.
fn window(valid_after: u64, valid_before: u64) -> String {
    match (timestamp(valid_after), timestamp(valid_before)) {
        (Some(after), Some(before)) => {
            format!("valid from {} to {}", after, before)
        }
        (Some(after), None) => format!("valid from {}, no expiry", after),
        (None, Some(before)) => format!("valid until {}", before),
        (None, None) => "valid forever".to_string(),
    }
}

fn timestamp(secs: u64) -> Option<String> {
    if secs == 0 || secs == u64::MAX {
        return None;
    }

    let secs = i64::try_from(secs).ok()?;
    Local
        .timestamp_opt(secs, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn unbounded_window_reads_as_forever() {
        assert_eq!(window(0, u64::MAX), "valid forever");
    }

    #[test]
    fn bounded_window_shows_both_ends() {
        let summary = window(1_700_000_000, 1_700_086_400);
        assert!(summary.starts_with("valid from 20"));
        assert!(summary.contains(" to 20"));
    }

    #[test]
    fn open_ended_expiry() {
        assert!(window(1_700_000_000, u64::MAX).ends_with("no expiry"));
    }

    #[test]
    fn unreadable_certificate_degrades_to_none() {
        assert_eq!(validity(Path::new("/no/such/cert.pub")), None);
    }

    #[test]
    fn unparsable_certificate_degrades_to_none() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"ssh-rsa AAAAB3NzaC1yc2EA not-a-cert\n").unwrap();

        assert_eq!(validity(file.path()), None);
    }

    #[test]
    fn empty_certificate_degrades_to_none() {
        let file = NamedTempFile::new().unwrap();
        assert_eq!(validity(file.path()), None);
    }
}
