// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logging setup shared by the diagnostic programs.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Initialize tracing.
///
/// `RUST_LOG` overrides the default filter. `LOG_FORMAT=json` switches to
/// structured JSON lines; otherwise output is compact and human-readable.
/// Logs go to stderr so the printed report on stdout stays clean.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        let format = tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true)
            .with_writer(std::io::stderr);
        tracing_subscriber::registry().with(filter).with(format).init();
    } else {
        let format = tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr);
        tracing_subscriber::registry().with(filter).with(format).init();
    }
}
