// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Inspects video thumbnails in storage.
//!
//! For each thumbnail, normalizes the stored path and asks for a signed URL.
//! When the object is missing, lists its directory and retries with the two
//! directory segments swapped.

use anyhow::Context;
use clap::Parser;
use futplus::config::{Config, PRIVILEGED_KEY_SOURCES};
use futplus::db::{SupabaseClient, VideoFilter};
use futplus::logging::init_logging;
use futplus::services::{InspectionTarget, ThumbnailInspector};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "inspect-thumbnails",
    about = "Check that video thumbnails can be signed"
)]
struct Args {
    /// Probe this storage path (or storage URL) directly instead of sampling videos
    path: Option<String>,

    #[arg(long, help = "Only sample premium videos")]
    premium_only: bool,

    #[arg(short, long, default_value_t = 5, help = "Number of videos to sample")]
    limit: usize,
}

impl Args {
    fn target(&self) -> InspectionTarget {
        match &self.path {
            Some(path) => InspectionTarget::Path(path.clone()),
            None => InspectionTarget::Videos(VideoFilter {
                premium_only: self.premium_only,
                with_thumbnail: true,
                limit: Some(self.limit),
            }),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = Config::from_env(PRIVILEGED_KEY_SOURCES).context("Cannot inspect thumbnails")?;

    if config.is_degraded(PRIVILEGED_KEY_SOURCES) {
        tracing::warn!(
            key_source = config.key_source,
            "SUPABASE_SERVICE_ROLE_KEY not set; using the anon key, listings may be incomplete"
        );
    }
    tracing::info!(
        bucket = %config.thumbnail_bucket,
        key_tier = %config.key_tier,
        "Inspecting thumbnails"
    );

    let client = SupabaseClient::new(&config);
    let inspector = ThumbnailInspector::new(&client, &config);

    let inspections = inspector
        .run(&args.target())
        .await
        .context("Failed to query videos")?;

    if inspections.is_empty() {
        println!("No videos matched");
    }
    for inspection in &inspections {
        println!("{}", inspection);
    }

    let signed = inspections.iter().filter(|i| i.is_signed()).count();
    println!("{} of {} thumbnails signed", signed, inspections.len());

    Ok(if signed == inspections.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
