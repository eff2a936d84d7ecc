// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Checks that the backend is reachable with the public credentials.
//!
//! Reads one row from a public table and counts a restricted one. Exits
//! non-zero if configuration is missing or either call fails.

use anyhow::Context;
use futplus::config::{Config, PUBLIC_KEY_SOURCES};
use futplus::db::SupabaseClient;
use futplus::logging::init_logging;
use futplus::services::{run_connection_test, ConnectionCheck};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let config = Config::from_env(PUBLIC_KEY_SOURCES).context("Cannot test connection")?;
    tracing::info!(
        url = %config.supabase_url,
        key_source = config.key_source,
        "Testing backend connection"
    );

    let client = SupabaseClient::new(&config);
    let report = run_connection_test(&client, &ConnectionCheck::default()).await;
    println!("{}", report);

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
