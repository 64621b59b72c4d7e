//! Process counters shared by the handlers.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use chrono::{DateTime, Utc};

/// Counts of work done since the process started.
///
/// One instance is created at startup and shared through the server state.
#[derive(Debug)]
pub struct Counters {
    started_at: DateTime<Utc>,
    started: Instant,
    reconciliations_run: AtomicU64,
    statements_generated: AtomicU64,
    receipts_generated: AtomicU64,
}

impl Default for Counters {
    fn default() -> Self {
        Self::new()
    }
}

impl Counters {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            started: Instant::now(),
            reconciliations_run: AtomicU64::new(0),
            statements_generated: AtomicU64::new(0),
            receipts_generated: AtomicU64::new(0),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn reconciliation_run(&self) {
        self.reconciliations_run.fetch_add(1, Ordering::Relaxed);
    }

    pub fn statement_generated(&self) {
        self.statements_generated_by(1);
    }

    pub fn statements_generated_by(&self, count: u64) {
        self.statements_generated.fetch_add(count, Ordering::Relaxed);
    }

    pub fn receipt_generated(&self) {
        self.receipts_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reconciliations_run(&self) -> u64 {
        self.reconciliations_run.load(Ordering::Relaxed)
    }

    pub fn statements_generated(&self) -> u64 {
        self.statements_generated.load(Ordering::Relaxed)
    }

    pub fn receipts_generated(&self) -> u64 {
        self.receipts_generated.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_independent() {
        let counters = Counters::new();
        counters.reconciliation_run();
        counters.reconciliation_run();
        counters.statement_generated();
        counters.statements_generated_by(3);
        counters.receipt_generated();

        assert_eq!(counters.reconciliations_run(), 2);
        assert_eq!(counters.statements_generated(), 4);
        assert_eq!(counters.receipts_generated(), 1);
        assert!(counters.started_at() <= Utc::now());
    }
}
