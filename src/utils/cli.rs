//! Command-line argument parsing and help for mdtail.
//!
//! Flags are handled here and exit before anything is watched.
//! Everything that is not a flag is passed on as a document argument.

use crate::config::Config;

/// What the entry point should do after looking at the arguments.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    /// Watch the given document arguments (possibly none).
    Watch(Vec<String>),
    /// Exit right away with the given code.
    Exit(i32),
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

/// Parses arguments without the program name.
pub fn parse_args(args: &[String]) -> CliAction {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return CliAction::Exit(0);
    }

    if args.iter().any(|a| a == "-v" || a == "--version") {
        print_version();
        return CliAction::Exit(0);
    }

    if args.iter().any(|a| a == "--init") {
        let code = match Config::generate_default(&Config::default_path()) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        };
        return CliAction::Exit(code);
    }

    if let Some(flag) = args.iter().find(|a| a.starts_with('-') && a.len() > 1) {
        eprintln!("Unknown argument: {}", flag);
        eprintln!("Try --help for available options");
        return CliAction::Exit(1);
    }

    CliAction::Watch(args.to_vec())
}

fn print_version() {
    println!("mdtail {}", env!("CARGO_PKG_VERSION"));
}

pub const HELP_TEXT: &str = r#"
mdtail - Terminal markdown viewer with live refresh

Usage:
  mdtail [file1.md] [file2.md] ...  Watch specific markdown files
  mdtail                             Watch TODO.md (default)
  mdtail -h, --help                  Show this help message
  mdtail -v, --version               Show the installed version
  mdtail --init                      Generate a default configuration file

Navigation:
  ← / → Arrow Keys                   Switch between tabs
  Ctrl+C                             Exit

Examples:
  mdtail README.md                   Watch README.md
  mdtail todo.md notes.md            Watch multiple files with tabs
  mdtail *.md                        Watch all markdown files in tabs

Environment:
  MDTAIL_CONFIG                      Override the default config path
  MDTAIL_LOG                         Override the default log file path
"#;

fn print_help() {
    println!("{}", HELP_TEXT);
}
