// SPDX-License-Identifier: MIT OR Apache-2.0

//! Print the OpenSSL configuration file in canonical form.
//!
//! The default configuration file (or the one named by `OPENSSL_CONF`) is parsed
//! and written back to stdout with all includes and variables expanded.

use clap::Parser;
use osslcfg::adapters::cli::{self, ConfigArgs};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = ConfigArgs::parse();
    cli::init_tracing(args.common.verbose);

    let layout = args.common.layout();
    let stdout = io::stdout();
    match cli::print_canonical(&cli::default_parser(), &layout, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report(&e);
            ExitCode::FAILURE
        }
    }
}
