// SPDX-License-Identifier: MIT OR Apache-2.0

//! Print the paths of the configuration file and of the provider and engine
//! modules it refers to.

use clap::{CommandFactory, Parser};
use osslcfg::adapters::cli::{self, FilesArgs};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = FilesArgs::parse();
    cli::init_tracing(args.common.verbose);

    if args.help {
        eprint!("{}", FilesArgs::command().render_help());
        return ExitCode::FAILURE;
    }

    let layout = args.layout();
    let stdout = io::stdout();
    match cli::list_files(args.selection(), &cli::default_parser(), &layout, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report(&e);
            ExitCode::FAILURE
        }
    }
}
