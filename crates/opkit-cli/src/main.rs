//! `opkit-cli` – run control units against the mock device directory
//!
//! This binary is the offline harness for opkit: it discovers the built-in
//! demo units, builds a
//! [`MockDeviceDirectory`][opkit_hal::MockDeviceDirectory], and drives a
//! unit through its lifecycle with no hardware attached.
//!
//! ```text
//! opkit list
//! opkit run <name> [--ticks N] [--profiles FILE]
//! ```
//!
//! Ctrl-C sets the session stop flag so the loop ends cleanly before the
//! next tick.

mod profiles;
mod units;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use opkit_config::Profiles;
use opkit_control::{Session, UnitRegistry};
use opkit_hal::MockDeviceDirectory;
use tracing::warn;

fn main() -> ExitCode {
    // ── Structured logging ────────────────────────────────────────────────
    // Initialise tracing-subscriber using RUST_LOG (defaults to "info").
    // Set OPKIT_LOG_FORMAT=json to emit newline-delimited JSON logs.
    // User-facing output still uses println! for UX consistency.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("OPKIT_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("list") => cmd_list(),
        Some("run") => cmd_run(&args[1..]),
        _ => {
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("{}", "opkit – offline control-unit harness".bold());
    println!();
    println!("  opkit list");
    println!("  opkit run <name> [--ticks N] [--profiles FILE]");
}

fn build_registry() -> Result<UnitRegistry, ExitCode> {
    let mut registry = UnitRegistry::new();
    if let Err(err) = registry.discover(units::descriptors()) {
        println!("{}: {}", "Discovery error".red(), err);
        return Err(ExitCode::FAILURE);
    }
    Ok(registry)
}

fn cmd_list() -> ExitCode {
    let registry = match build_registry() {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    println!("{}", "Registered control units:".bold());
    for name in registry.names() {
        println!("  • {name}");
    }
    ExitCode::SUCCESS
}

fn cmd_run(args: &[String]) -> ExitCode {
    let Some(name) = args.first().filter(|a| !a.starts_with("--")) else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let mut ticks: u64 = 10;
    let mut profile_path: Option<PathBuf> = None;
    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        match (flag.as_str(), rest.next()) {
            ("--ticks", Some(value)) => match value.parse() {
                Ok(parsed) => ticks = parsed,
                Err(_) => {
                    println!("{}: --ticks expects a number", "Argument error".red());
                    return ExitCode::FAILURE;
                }
            },
            ("--profiles", Some(value)) => profile_path = Some(PathBuf::from(value)),
            _ => {
                print_usage();
                return ExitCode::FAILURE;
            }
        }
    }

    let registry = match build_registry() {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    let profiles = match &profile_path {
        Some(path) => match profiles::load(path) {
            Ok(profiles) => {
                println!("  Profiles loaded from {}", path.display().to_string().bold());
                profiles
            }
            Err(err) => {
                println!("{}: {}", "Profile error".red(), err);
                return ExitCode::FAILURE;
            }
        },
        None => Profiles::new(),
    };

    // ── Shared stop flag + Ctrl-C handler ────────────────────────────────
    let stop = Arc::new(AtomicBool::new(false));
    let stop_for_ctrlc = stop.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received – stopping after current tick …".yellow().bold());
        stop_for_ctrlc.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler; Ctrl-C will abort without running stop()");
    }

    let mock = MockDeviceDirectory::new();
    let session = Session::new(&registry, &profiles, &mock).with_stop_flag(stop);

    println!(
        "  Running {} for up to {} tick(s) against the mock directory …",
        name.bold(),
        ticks
    );
    match session.run(name, ticks) {
        Ok(executed) => {
            println!("  {} {} tick(s) executed.", "✓".green(), executed);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}: {}", "Session error".red(), err);
            ExitCode::FAILURE
        }
    }
}
