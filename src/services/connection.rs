// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Connection test: one read on a public table, one count on a restricted one.

use crate::db::{tables, Backend, SelectQuery};
use crate::services::report::{ProbeOutcome, ProbeReport};

pub const PUBLIC_READ: &str = "public read";
pub const RESTRICTED_COUNT: &str = "restricted count";

/// Tables touched by the connection test.
#[derive(Debug, Clone)]
pub struct ConnectionCheck {
    pub public_table: String,
    pub restricted_table: String,
}

impl Default for ConnectionCheck {
    fn default() -> Self {
        Self {
            public_table: tables::VIDEOS.to_string(),
            restricted_table: tables::USERS.to_string(),
        }
    }
}

/// Run both calls; neither is retried and a failure in one does not skip the other.
pub async fn run_connection_test<B: Backend>(backend: &B, check: &ConnectionCheck) -> ProbeReport {
    let mut report = ProbeReport::default();

    let query = SelectQuery::new(&check.public_table).limit(1);
    report.push(match backend.select(&query).await {
        Ok(rows) => ProbeOutcome::passed(
            PUBLIC_READ,
            format!("read {} row(s) from {}", rows.len(), check.public_table),
        ),
        Err(e) => ProbeOutcome::failed(PUBLIC_READ, format!("{}: {}", check.public_table, e)),
    });

    report.push(match backend.count(&check.restricted_table).await {
        Ok(total) => ProbeOutcome::passed(
            RESTRICTED_COUNT,
            format!("{} has {} row(s)", check.restricted_table, total),
        ),
        Err(e) => ProbeOutcome::failed(
            RESTRICTED_COUNT,
            format!("{}: {}", check.restricted_table, e),
        ),
    });

    report
}
