// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - diagnostic procedures run against the backend.

pub mod connection;
pub mod probes;
pub mod report;
pub mod thumbnail;

pub use connection::{run_connection_test, ConnectionCheck};
pub use probes::{run_problem_queries, ProbePlan};
pub use report::{ProbeOutcome, ProbeReport, ProbeStatus};
pub use thumbnail::{
    InspectionResult, InspectionTarget, ThumbnailInspection, ThumbnailInspector,
};
