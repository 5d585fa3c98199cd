//! Basic usage example for the CampusNet client
//!
//! This example demonstrates how to:
//! - Create a client from an application identity
//! - Authenticate with the user's password
//! - Fetch the profile and grades
//!
//! Set `CAMPUSNET_APP_NAME`, `CAMPUSNET_API_TOKEN`, `CAMPUSNET_USER` and
//! `CAMPUSNET_PASSWORD` before running.

use campusnet_client::{CampusNetClient, Identity};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = |name: &str| std::env::var(name).map_err(|_| format!("{} not set", name));

    let identity = Identity::new(
        env("CAMPUSNET_APP_NAME")?,
        env("CAMPUSNET_API_TOKEN")?,
        env("CAMPUSNET_USER")?,
    );
    let password = env("CAMPUSNET_PASSWORD")?;

    let mut client = CampusNetClient::builder()
        .client_builder(
            reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .use_rustls_tls(),
        )
        .build(identity)?;

    println!("Authenticating...");
    if !client.authenticate(&password)? {
        println!("✗ Authentication rejected");
        return Ok(());
    }
    println!("✓ Authenticated");

    match client.profile()? {
        Some(profile) => println!(
            "\n{} {} <{}>",
            profile.first_name, profile.last_name, profile.email
        ),
        None => println!("\nProfile not available"),
    }

    match client.grades()? {
        Some(grades) => {
            println!("\n{} exam result(s):", grades.len());
            for result in grades {
                println!(
                    "  {} {:<40} {:>3} ({} ECTS, {} {})",
                    result.course.code,
                    result.course.title,
                    result.grade,
                    result.credit_points,
                    result.period,
                    result.year
                );
            }
        }
        None => println!("\nGrades not available"),
    }

    Ok(())
}
