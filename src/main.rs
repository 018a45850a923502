use log::{error, LevelFilter};
use simplelog::{Config, WriteLogger};
use std::fs::OpenOptions;
use std::process::ExitCode;
use tile_console::{run, App, AppResult, Error, Template};

const LOG_FILE: &str = "tile_console.log";

fn init_logging() {
    // The terminal backend owns stdout, so logs always go to a file.
    match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(log_file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
                eprintln!("Logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!("Could not open {}: {}", LOG_FILE, e),
    }
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let mut app = match Template::init(&args) {
        Ok(app) => app,
        Err(Error::Usage(e)) => e.exit(),
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&mut app) {
        AppResult::Failure => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
