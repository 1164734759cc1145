//! Session list loading
//!
//! The session file is either TOML with a `[[sessions]]` array or a JSON
//! array of records, chosen by extension. Every record is validated up
//! front; one bad row rejects the file.

use anyhow::{bail, Context, Result};
use classtime_core::{SessionRecord, SessionSchedule};
use classtime_util::SessionId;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SessionFile {
    #[serde(default)]
    sessions: Vec<SessionRecord>,
}

/// A validated session ready to hand to the hub
#[derive(Debug, Clone)]
pub struct LoadedSession {
    pub id: SessionId,
    pub label: String,
    pub schedule: SessionSchedule,
}

pub fn load_sessions(path: &Path) -> Result<Vec<LoadedSession>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sessions file {:?}", path))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let records = if is_json {
        parse_json(&content)
    } else {
        parse_toml(&content)
    }
    .with_context(|| format!("Failed to parse sessions file {:?}", path))?;

    validate_records(&records)
}

fn parse_toml(content: &str) -> Result<Vec<SessionRecord>> {
    let file: SessionFile = toml::from_str(content)?;
    Ok(file.sessions)
}

fn parse_json(content: &str) -> Result<Vec<SessionRecord>> {
    Ok(serde_json::from_str(content)?)
}

pub fn validate_records(records: &[SessionRecord]) -> Result<Vec<LoadedSession>> {
    let mut sessions: Vec<LoadedSession> = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let schedule = record
            .to_schedule()
            .with_context(|| format!("Invalid session #{} ({})", index + 1, record.label()))?;

        let id = record.session_id();
        if sessions.iter().any(|s| s.id == id) {
            bail!("Duplicate session id '{}' at session #{}", id, index + 1);
        }

        sessions.push(LoadedSession {
            id,
            label: record.label(),
            schedule,
        });
    }

    Ok(sessions)
}
