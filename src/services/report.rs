// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-probe outcomes collected by the diagnostic programs.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Passed,
    Failed,
}

/// Result of one backend call, kept independent of every other probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub name: String,
    pub status: ProbeStatus,
    pub detail: String,
}

impl ProbeOutcome {
    pub fn passed(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: ProbeStatus::Passed,
            detail: detail.into(),
        }
    }

    pub fn failed(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: ProbeStatus::Failed,
            detail: detail.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ProbeStatus::Passed
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self.status {
            ProbeStatus::Passed => "✅",
            ProbeStatus::Failed => "❌",
        };
        write!(f, "{} {}: {}", mark, self.name, self.detail)
    }
}

/// Ordered outcomes of a diagnostic run.
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    outcomes: Vec<ProbeOutcome>,
}

impl ProbeReport {
    /// Record an outcome, logging it as it lands in the report.
    pub fn push(&mut self, outcome: ProbeOutcome) {
        match outcome.status {
            ProbeStatus::Passed => {
                tracing::info!(probe = %outcome.name, detail = %outcome.detail, "Probe passed")
            }
            ProbeStatus::Failed => {
                tracing::warn!(probe = %outcome.name, detail = %outcome.detail, "Probe failed")
            }
        }
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[ProbeOutcome] {
        &self.outcomes
    }

    pub fn get(&self, name: &str) -> Option<&ProbeOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(ProbeOutcome::is_passed)
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_passed()).count()
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        write!(
            f,
            "{} of {} checks passed",
            self.outcomes.len() - self.failure_count(),
            self.outcomes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct CountEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for CountEvents {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_outcomes_log_only_when_pushed() {
        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountEvents(events.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let passed = ProbeOutcome::passed("read", "1 row(s)");
            let failed = ProbeOutcome::failed("count", "denied");
            assert_eq!(events.load(Ordering::SeqCst), 0);

            let mut report = ProbeReport::default();
            report.push(passed);
            report.push(failed);
            assert_eq!(events.load(Ordering::SeqCst), 2);
        });
    }

    #[test]
    fn test_report_summary() {
        let mut report = ProbeReport::default();
        report.push(ProbeOutcome::passed("read", "1 row(s)"));
        report.push(ProbeOutcome::failed("count", "denied"));

        assert!(!report.all_passed());
        assert_eq!(report.failure_count(), 1);
        assert_eq!(
            report.to_string(),
            "✅ read: 1 row(s)\n❌ count: denied\n1 of 2 checks passed"
        );
    }
}
