//! Config validation CLI tool
//!
//! Validates a halaqa schedule file and reports any errors.

use halaqa_util::{default_config_path, format_datetime_full};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a halaqa schedule file.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match halaqa_config::load_config(&config_path) {
        Ok(schedule) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", halaqa_config::CURRENT_CONFIG_VERSION);
            println!("  Join window: {} min", schedule.engine.join_window_minutes);
            println!(
                "  Link generation lead: {} min",
                schedule.engine.link_lead_minutes
            );
            println!("  Sessions: {}", schedule.sessions.len());

            if !schedule.sessions.is_empty() {
                println!();
                println!("Sessions:");
                for session in &schedule.sessions {
                    let meeting = match &session.meeting {
                        Some(m) if m.ready => "link ready",
                        Some(_) => "link pending",
                        None => "no meeting",
                    };
                    println!(
                        "  - {} [{}, {}]: {} at {} for {} min",
                        session.id,
                        session.admin_status,
                        meeting,
                        session.title,
                        format_datetime_full(&session.start_time),
                        session.duration_minutes
                    );
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                halaqa_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                halaqa_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                halaqa_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                halaqa_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        halaqa_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
