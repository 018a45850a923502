use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

pub mod app;
pub mod core;
pub mod error;
pub mod renderers;
pub mod util;

pub use app::{run, App, AppResult, Template};
pub use crate::core::Color;
pub use crate::core::Console;
pub use error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTarget {
    Terminal,
    Window,
}

/// Startup options parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub target: DisplayTarget,
    /// Where the upward search for the data directory begins.
    pub data_dir: Option<PathBuf>,
    pub verbose: bool,
}

pub fn create_clap_command() -> Command {
    Command::new("tile_console")
        .about("Move an @ around an 80x40 character grid")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Render backend ('window', 'terminal', 'w', or 't')")
                .required(false)
                .value_parser(["window", "terminal", "w", "t"]),
        )
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("DIR")
                .help("Start the search for the data directory here instead of the working directory")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log every move")
                .action(ArgAction::SetTrue),
        )
}

pub fn handle_clap_matches(matches: &clap::ArgMatches) -> Options {
    let target = match matches.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("terminal") | Some("t") => DisplayTarget::Terminal,
        _ => DisplayTarget::Window,
    };
    Options {
        target,
        data_dir: matches.get_one::<String>("data-dir").map(PathBuf::from),
        verbose: matches.get_flag("verbose"),
    }
}
