// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FutPlus: football training videos, nutrition plans and progress tracking.
//!
//! This crate holds the shared record types and navigation routes used by
//! the mobile app, the screen wrapper's layout logic, a typed client for the
//! hosted database/storage backend, and the diagnostic procedures behind
//! the `test-connection`, `test-problem-queries` and `inspect-thumbnails`
//! programs.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod services;
pub mod time_utils;
pub mod ui;
