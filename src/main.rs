//! Superset Settings Resolver - Main CLI Application
//!
//! Resolves a deployment settings profile from built-in defaults,
//! environment variables, and CLI overrides, then validates and renders it.

use clap::Parser;
use std::process;
use superset_settings::{
    app::App,
    cli::Cli,
    error::AppError,
    PKG_NAME, VERSION,
};

fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!("Debug mode enabled");
        println!();
    }

    let result = App::new(cli).and_then(App::run);

    if let Err(e) = result {
        eprintln!("Error: {}", e);

        // Print suggestions for common errors
        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - Run 'sst --show-env' to list supported variables");
            eprintln!("  - Run 'sst --help-topic env' for resolution order details");
        }
        AppError::Validation(_) => {
            eprintln!();
            eprintln!("Validation help:");
            eprintln!("  - Run 'sst --check' for the full findings report");
            eprintln!("  - Derived task-queue URLs must match the database URI;");
            eprintln!("    see 'sst --help-topic derivation'");
        }
        AppError::Io(_) => {
            eprintln!();
            eprintln!("I/O troubleshooting:");
            eprintln!("  - Check that the target path exists and is writable");
        }
        _ => {}
    }
}
