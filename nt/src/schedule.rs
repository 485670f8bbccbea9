//! Scheduling service boundary
//!
//! The scheduler itself (persistence, triggers, delivery) lives outside
//! this crate. The `cron` tool only needs to add, list and remove jobs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// When a job fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Schedule {
    /// Fixed interval in milliseconds
    Every { every_ms: u64 },

    /// Cron expression, optionally evaluated in an IANA timezone
    Cron { expr: String, tz: Option<String> },

    /// One-shot at a unix timestamp in milliseconds
    At { at_ms: i64 },
}

impl Schedule {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Every { .. } => "every",
            Self::Cron { .. } => "cron",
            Self::At { .. } => "at",
        }
    }
}

/// Where a fired job's message is delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTarget {
    pub channel: String,
    pub to: String,
}

/// Everything the scheduler needs to create a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    pub name: String,
    pub schedule: Schedule,
    pub message: String,
    pub deliver: bool,
    pub target: DeliveryTarget,
    pub delete_after_run: bool,
}

/// A job as reported back by the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronJob {
    pub id: String,
    pub name: String,
    pub schedule: Schedule,
}

/// Scheduling service consumed by the `cron` tool
#[async_trait]
pub trait CronService: Send + Sync {
    async fn add_job(&self, job: NewJob) -> eyre::Result<CronJob>;

    async fn list_jobs(&self) -> eyre::Result<Vec<CronJob>>;

    /// Returns false when no job has that id
    async fn remove_job(&self, id: &str) -> eyre::Result<bool>;
}

pub type CronServiceRef = Arc<dyn CronService>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_kind() {
        assert_eq!(Schedule::Every { every_ms: 1000 }.kind(), "every");
        assert_eq!(
            Schedule::Cron {
                expr: "0 9 * * *".into(),
                tz: None
            }
            .kind(),
            "cron"
        );
        assert_eq!(Schedule::At { at_ms: 0 }.kind(), "at");
    }

    #[test]
    fn test_schedule_serializes_tagged() {
        let json = serde_json::to_value(Schedule::Every { every_ms: 3_600_000 }).unwrap();
        assert_eq!(json["kind"], "every");
        assert_eq!(json["every_ms"], 3_600_000);
    }
}
