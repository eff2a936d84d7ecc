// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Runs the problem-query probes: plain select, hinted join, unhinted join
//! and an insert/delete round trip. Every probe runs even if an earlier one
//! fails.

use anyhow::Context;
use futplus::config::{Config, PUBLIC_KEY_SOURCES};
use futplus::db::SupabaseClient;
use futplus::logging::init_logging;
use futplus::services::{run_problem_queries, ProbePlan};
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
    let config = Config::from_env(PUBLIC_KEY_SOURCES).context("Cannot run query probes")?;
    tracing::info!(url = %config.supabase_url, "Running problem-query probes");

    let client = SupabaseClient::new(&config);
    let report = run_problem_queries(&client, &ProbePlan::default()).await;
    println!("{}", report);

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
