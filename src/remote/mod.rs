//! Fire-and-forget copy of new single-shift entries to a hosted
//! `scheduling` table (PostgREST endpoint).
//!
//! The local roster is the source of truth. A failed insert is written to
//! the audit log and reported as a warning; it never undoes the local change.

use crate::config::RemoteConfig;
use crate::core::validation::SingleShiftForm;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use rusqlite::Connection;
use serde::Serialize;
use std::time::Duration;

/// Row shape of the remote table. Times are the raw form strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRecord {
    pub user_id: String,
    pub name: String,
    pub role: String,
    #[serde(rename = "shiftStart")]
    pub shift_start: String,
    #[serde(rename = "shiftEnd")]
    pub shift_end: String,
    #[serde(rename = "breakStart")]
    pub break_start: String,
    #[serde(rename = "breakEnd")]
    pub break_end: String,
}

impl ScheduleRecord {
    pub fn from_form(owner_id: &str, form: &SingleShiftForm) -> Self {
        Self {
            user_id: owner_id.to_string(),
            name: form.name.trim().to_string(),
            role: form.role.trim().to_string(),
            shift_start: form.shift_start.clone(),
            shift_end: form.shift_end.clone(),
            break_start: form.break_start.clone(),
            break_end: form.break_end.clone(),
        }
    }
}

pub trait RemoteSink {
    fn insert(&self, record: &ScheduleRecord) -> AppResult<()>;
}

pub struct SupabaseSink {
    client: reqwest::blocking::Client,
    endpoint: String,
    anon_key: String,
}

impl SupabaseSink {
    pub fn new(url: &str, anon_key: &str) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/scheduling", url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RemoteSink for SupabaseSink {
    fn insert(&self, record: &ScheduleRecord) -> AppResult<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AppError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Sink for the configured remote, if it is enabled and complete.
pub fn sink_from_config(remote: &RemoteConfig) -> AppResult<Option<SupabaseSink>> {
    if !remote.is_usable() {
        return Ok(None);
    }
    SupabaseSink::new(&remote.url, &remote.anon_key).map(Some)
}

/// Push one record; failures end up in the audit log and as a warning.
/// Returns whether the insert went through.
pub fn push_best_effort(conn: &Connection, sink: &dyn RemoteSink, record: &ScheduleRecord) -> bool {
    match sink.insert(record) {
        Ok(()) => true,
        Err(e) => {
            ttlog_quiet(conn, "remote", &record.name, &format!("Remote insert failed: {e}"));
            warning("Remote sync failed; the local roster was kept.");
            false
        }
    }
}
