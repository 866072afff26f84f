// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clap::Parser;
use env_logger::Builder;
use log::{error, warn, LevelFilter};
use std::{path::PathBuf, process::ExitCode};

use keyfetch::{config::Config, secret::StdioPasswordReader, Cancel};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Fetch a short-lived SSH private key and signed certificate from an
/// issuance service and install them into the local key directory.
struct Args {
    /// Increase verbosity
    #[clap(long, env)]
    verbose: bool,

    /// Account name to authenticate as
    #[clap(short, long, env = "USER")]
    username: String,

    /// Credential scope to request; also names the key file
    #[clap(short, long, env)]
    scope: Option<String>,

    /// Where to install the private key; the certificate lands next to it
    #[clap(short, long, env)]
    output: Option<PathBuf>,

    /// Issuance server, `host` or `scheme://host`
    #[clap(short = 'U', long, env, default_value = "sshproxy.example.com")]
    server: String,

    /// Add the new key to the running ssh-agent after install
    #[clap(short, long, env)]
    agent: bool,
}

// Exit codes: 0 success, 1 interrupted or failed before the request went
// out, 3 transport failure, 4 authentication failure, 5 malformed server
// response, 6 pair issued but not installed. 2 is clap's usage error.
fn main() -> ExitCode {
    let args = Args::parse();

    let mut builder = Builder::from_default_env();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    builder.filter(None, level).init();

    let config = Config {
        username: args.username,
        scope: args.scope,
        output: args.output,
        server: args.server,
        agent: args.agent,
    };

    let cancel = Cancel::new();
    {
        let cancel = cancel.clone();
        if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
            warn!("failed to install interrupt handler: {}", e);
        }
    }

    match keyfetch::run(&config, &mut StdioPasswordReader::default(), &cancel)
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
