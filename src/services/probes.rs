// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Problem-query probes.
//!
//! Four sequential checks against queries the app has had trouble with:
//! 1. Plain select on the videos table
//! 2. Progress rows joined to users through an explicit foreign-key hint
//! 3. The same join without the hint (detects relationship ambiguity)
//! 4. Insert-then-delete round trip for a placeholder user
//!
//! Every probe reports its own outcome. A failure never skips later probes.

use crate::db::{tables, Backend, Embed, SelectQuery};
use crate::models::NewUserProgress;
use crate::services::report::{ProbeOutcome, ProbeReport};
use crate::time_utils::today_utc;
use chrono::NaiveDate;
use serde_json::Value;

pub const PLAIN_SELECT: &str = "plain select";
pub const JOIN_WITH_HINT: &str = "join with fk hint";
pub const JOIN_WITHOUT_HINT: &str = "join without fk hint";
pub const INSERT_DELETE: &str = "insert/delete round trip";

/// Identifier that never belongs to a real user.
pub const PLACEHOLDER_USER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Foreign key from `progreso_usuario.user_id` to `usuarios.id`.
pub const PROGRESS_USER_FKEY: &str = "progreso_usuario_user_id_fkey";

/// What the probes query.
#[derive(Debug, Clone)]
pub struct ProbePlan {
    pub select_table: String,
    pub join_table: String,
    pub joined_table: String,
    pub foreign_key: String,
    pub placeholder_user_id: String,
    pub progress_date: NaiveDate,
}

impl Default for ProbePlan {
    fn default() -> Self {
        Self {
            select_table: tables::VIDEOS.to_string(),
            join_table: tables::USER_PROGRESS.to_string(),
            joined_table: tables::USERS.to_string(),
            foreign_key: PROGRESS_USER_FKEY.to_string(),
            placeholder_user_id: PLACEHOLDER_USER_ID.to_string(),
            progress_date: today_utc(),
        }
    }
}

/// Run all four probes in order.
pub async fn run_problem_queries<B: Backend>(backend: &B, plan: &ProbePlan) -> ProbeReport {
    let mut report = ProbeReport::default();
    report.push(plain_select(backend, plan).await);
    report.push(join_with_hint(backend, plan).await);
    report.push(join_without_hint(backend, plan).await);
    report.push(insert_then_delete(backend, plan).await);
    report
}

async fn plain_select<B: Backend>(backend: &B, plan: &ProbePlan) -> ProbeOutcome {
    let query = SelectQuery::new(&plan.select_table).limit(5);
    match backend.select(&query).await {
        Ok(rows) => ProbeOutcome::passed(PLAIN_SELECT, format!("{} row(s)", rows.len())),
        Err(e) => ProbeOutcome::failed(PLAIN_SELECT, e.to_string()),
    }
}

async fn join_with_hint<B: Backend>(backend: &B, plan: &ProbePlan) -> ProbeOutcome {
    let query = SelectQuery::new(&plan.join_table)
        .embed(Embed::via(&plan.joined_table, &plan.foreign_key, "id,email"))
        .limit(5);
    match backend.select(&query).await {
        Ok(rows) => ProbeOutcome::passed(
            JOIN_WITH_HINT,
            format!("{} row(s) via {}", rows.len(), query.select_param()),
        ),
        Err(e) => ProbeOutcome::failed(JOIN_WITH_HINT, e.to_string()),
    }
}

async fn join_without_hint<B: Backend>(backend: &B, plan: &ProbePlan) -> ProbeOutcome {
    let query = SelectQuery::new(&plan.join_table)
        .embed(Embed::inferred(&plan.joined_table, "id,email"))
        .limit(5);
    match backend.select(&query).await {
        Ok(rows) => ProbeOutcome::passed(
            JOIN_WITHOUT_HINT,
            format!("{} row(s); relationship is unambiguous", rows.len()),
        ),
        Err(e) if e.is_ambiguous_relationship() => ProbeOutcome::failed(
            JOIN_WITHOUT_HINT,
            format!(
                "ambiguous relationship between {} and {}; queries must use {}!{}",
                plan.join_table, plan.joined_table, plan.joined_table, plan.foreign_key
            ),
        ),
        Err(e) => ProbeOutcome::failed(JOIN_WITHOUT_HINT, e.to_string()),
    }
}

/// Row id as text; the backend may use UUIDs or integers.
fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

async fn insert_then_delete<B: Backend>(backend: &B, plan: &ProbePlan) -> ProbeOutcome {
    let mut payload = NewUserProgress::empty(&plan.placeholder_user_id, plan.progress_date);
    payload.notes = Some("diagnostic probe".to_string());

    let row = match serde_json::to_value(&payload) {
        Ok(row) => row,
        Err(e) => return ProbeOutcome::failed(INSERT_DELETE, format!("encode: {}", e)),
    };

    let inserted = match backend.insert(&plan.join_table, &row).await {
        Ok(rows) => rows,
        Err(e) => return ProbeOutcome::failed(INSERT_DELETE, format!("insert: {}", e)),
    };

    // Without an id, fall back to deleting everything owned by the placeholder.
    let (column, value) = match inserted.first().and_then(row_id) {
        Some(id) => ("id", id),
        None => ("user_id", plan.placeholder_user_id.clone()),
    };

    match backend.delete_eq(&plan.join_table, column, &value).await {
        Ok(deleted) if deleted.is_empty() => ProbeOutcome::failed(
            INSERT_DELETE,
            format!(
                "delete: no rows removed (row {}={} may remain in {})",
                column, value, plan.join_table
            ),
        ),
        Ok(deleted) => ProbeOutcome::passed(
            INSERT_DELETE,
            format!(
                "inserted and deleted {}={} ({} row(s))",
                column,
                value,
                deleted.len()
            ),
        ),
        Err(e) => ProbeOutcome::failed(
            INSERT_DELETE,
            format!(
                "delete: {} (row {}={} may remain in {})",
                e, column, value, plan.join_table
            ),
        ),
    }
}
