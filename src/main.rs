//! main.rs
//! Entry point for mdtail

use mdtail::app::DocumentSet;
use mdtail::config::Config;
use mdtail::core::{resolve_documents, terminal};
use mdtail::error::ViewerError;
use mdtail::utils::cli::{CliAction, handle_args};
use mdtail::utils::logging;

use std::process::ExitCode;

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        terminal::restore_terminal();

        eprintln!("\n[mdtail] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let args = match handle_args() {
        CliAction::Exit(code) => return exit_code(code),
        CliAction::Watch(args) => args,
    };

    let config = Config::load();
    logging::init(config.logging());

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Error: cannot read working directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let resolution = resolve_documents(&args, &cwd, config.general());
    for warning in &resolution.warnings {
        eprintln!("Warning: {}", warning);
    }

    let documents = match DocumentSet::initialize(resolution.paths) {
        Ok(documents) => documents,
        Err(e @ ViewerError::EmptySet) => {
            eprintln!("Error: {}", e);
            eprintln!("Run \"mdtail --help\" for usage information");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match terminal::run_terminal(&config, documents) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(u8::try_from(code).unwrap_or(1))
    }
}
