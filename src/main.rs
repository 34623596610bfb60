#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! envtmpl — render glob-loaded templates against the process environment.

mod cli;
mod commands;
mod render;

use cli::{OutputCtx, parse_flags, write_args_error, write_error};

fn main() {
    let mut argv = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
    let progname = argv.next().unwrap_or_else(|| "envtmpl".to_owned());
    let args: Vec<String> = argv.collect();

    let config = match parse_flags(&progname, &args) {
        Ok(config) => config,
        Err(err) => {
            write_args_error(&err);
            std::process::exit(err.exit_code());
        }
    };

    let ctx = OutputCtx::new(config.debug);

    if let Err(err) = commands::run(&config, &ctx) {
        write_error(err.phase(), &err);
        std::process::exit(err.exit_code());
    }
}
