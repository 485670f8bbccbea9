//! cron tool - add, list and remove scheduled jobs

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::schedule::{CronService, DeliveryTarget, NewJob, Schedule};
use crate::tools::{SessionContext, Tool, ToolContext, ToolError, ToolResult, parse_input};

/// Job names are the message truncated to this many characters
const JOB_NAME_MAX_CHARS: usize = 30;

/// Naive datetime layouts accepted for `at`, interpreted in local time
const NAIVE_AT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Schedule reminders and recurring tasks through the scheduling service
pub struct CronTool;

#[derive(Debug, Deserialize)]
struct CronInput {
    action: String,
    #[serde(default)]
    message: String,
    every_seconds: Option<u64>,
    cron_expr: Option<String>,
    tz: Option<String>,
    at: Option<String>,
    job_id: Option<String>,
}

#[async_trait]
impl Tool for CronTool {
    fn name(&self) -> &'static str {
        "cron"
    }

    fn description(&self) -> &'static str {
        "Add, list, or remove scheduled reminders and recurring tasks. Use when the user asks for a reminder \
         at a specific time, a daily/weekly task, or to see or manage existing scheduled jobs."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": ["add", "list", "remove"],
                    "description": "add = schedule a reminder/task; list = show jobs; remove = delete by job_id"
                },
                "message": {
                    "type": "string",
                    "description": "Reminder or task message (required for add)"
                },
                "every_seconds": {
                    "type": "integer",
                    "description": "Repeat interval in seconds (e.g. 3600 for hourly)"
                },
                "cron_expr": {
                    "type": "string",
                    "description": "Cron expression (e.g. '0 9 * * *' for daily at 09:00)"
                },
                "tz": {
                    "type": "string",
                    "description": "IANA timezone for cron (e.g. 'America/Vancouver')"
                },
                "at": {
                    "type": "string",
                    "description": "One-time run at ISO datetime (e.g. '2026-02-12T10:30:00')"
                },
                "job_id": {
                    "type": "string",
                    "description": "Job ID to remove (from cron list)"
                }
            },
            "required": ["action"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "CronTool::execute: called");

        let cron = match &ctx.cron {
            Some(c) => c,
            None => {
                debug!("CronTool::execute: scheduling service not available");
                return ToolError::Unavailable {
                    capability: "Scheduling",
                }
                .into();
            }
        };

        let input: CronInput = match parse_input(input) {
            Ok(i) => i,
            Err(e) => return e.into(),
        };

        let result = match input.action.as_str() {
            "add" => add_job(cron.as_ref(), ctx.session.as_ref(), &input).await,
            "list" => list_jobs(cron.as_ref()).await,
            "remove" => remove_job(cron.as_ref(), input.job_id.as_deref()).await,
            other => {
                debug!(%other, "CronTool::execute: unknown action");
                return ToolResult::error(format!("Unknown action: {}", other));
            }
        };

        result.into()
    }
}

async fn add_job(
    cron: &dyn CronService,
    session: Option<&SessionContext>,
    input: &CronInput,
) -> Result<String, ToolError> {
    if input.message.is_empty() {
        return Err(ToolError::InvalidArgument("message is required for add".to_string()));
    }
    let session = session.ok_or(ToolError::Unavailable {
        capability: "Session context (channel/chat_id)",
    })?;
    if input.tz.is_some() && input.cron_expr.is_none() {
        return Err(ToolError::InvalidArgument("tz can only be used with cron_expr".to_string()));
    }
    if let Some(tz) = &input.tz
        && tz.parse::<Tz>().is_err()
    {
        return Err(ToolError::InvalidArgument(format!("unknown timezone '{}'", tz)));
    }

    let (schedule, delete_after_run) = build_schedule(input)?;
    debug!(kind = schedule.kind(), "add_job: schedule built");

    let job = cron
        .add_job(NewJob {
            name: input.message.chars().take(JOB_NAME_MAX_CHARS).collect(),
            schedule,
            message: input.message.clone(),
            deliver: true,
            target: DeliveryTarget {
                channel: session.channel.clone(),
                to: session.chat_id.clone(),
            },
            delete_after_run,
        })
        .await?;

    info!(job_id = %job.id, job_name = %job.name, "Scheduled job created");
    Ok(format!("Created job '{}' (id: {})", job.name, job.id))
}

/// Pick the schedule from whichever of every_seconds / cron_expr / at is set
fn build_schedule(input: &CronInput) -> Result<(Schedule, bool), ToolError> {
    if let Some(seconds) = input.every_seconds.filter(|s| *s > 0) {
        return Ok((
            Schedule::Every {
                every_ms: seconds.saturating_mul(1000),
            },
            false,
        ));
    }
    if let Some(expr) = &input.cron_expr {
        return Ok((
            Schedule::Cron {
                expr: expr.clone(),
                tz: input.tz.clone(),
            },
            false,
        ));
    }
    if let Some(at) = &input.at {
        return Ok((Schedule::At { at_ms: parse_at(at)? }, true));
    }
    Err(ToolError::InvalidArgument(
        "either every_seconds, cron_expr, or at is required".to_string(),
    ))
}

/// Parse an ISO datetime into unix milliseconds; naive values are local time
fn parse_at(at: &str) -> Result<i64, ToolError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(at) {
        return Ok(dt.timestamp_millis());
    }

    let naive = NAIVE_AT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(at, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(at, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });

    naive
        .and_then(|n| n.and_local_timezone(Local).earliest())
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| {
            ToolError::InvalidArgument(format!(
                "invalid datetime '{}' for at (expected ISO format, e.g. 2026-02-12T10:30:00)",
                at
            ))
        })
}

async fn list_jobs(cron: &dyn CronService) -> Result<String, ToolError> {
    let jobs = cron.list_jobs().await?;
    if jobs.is_empty() {
        return Ok("No scheduled jobs.".to_string());
    }

    let lines: Vec<String> = jobs
        .iter()
        .map(|j| format!("- {} (id: {}, {})", j.name, j.id, j.schedule.kind()))
        .collect();
    Ok(format!("Scheduled jobs:\n{}", lines.join("\n")))
}

async fn remove_job(cron: &dyn CronService, job_id: Option<&str>) -> Result<String, ToolError> {
    let job_id = match job_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(ToolError::InvalidArgument("job_id is required for remove".to_string())),
    };

    if cron.remove_job(job_id).await? {
        info!(%job_id, "Scheduled job removed");
        Ok(format!("Removed job {}", job_id))
    } else {
        Err(ToolError::InvalidArgument(format!("Job {} not found", job_id)))
    }
}
