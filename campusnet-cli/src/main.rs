//! CampusNet CLI - Command-line interface for reading profile and grades

mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use output::OutputFormatter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default)
fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let mut client = config.client()?;

    let user = &config.identity.subject_id;
    let password = config::resolve_password(user)?;
    if !client.authenticate(&password)? {
        return Err(CliError::AuthenticationRejected { user: user.clone() });
    }
    tracing::info!(user = %user, "authenticated");

    // Each read is independent; a fault in one does not stop the other
    let formatter = OutputFormatter::new(config.quiet);
    if config.show_profile {
        formatter.print_profile(client.profile()?.as_ref());
    }
    if config.show_grades {
        formatter.print_grades(client.grades()?.as_deref());
    }

    Ok(())
}
