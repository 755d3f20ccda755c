//! Maps heterogeneous provider records onto the canonical `Job` shape and
//! deduplicates them within one fetch pass.

use std::collections::HashSet;

use serde_json::Value;

use crate::providers::Job;

const TITLE_KEYS: &[&str] = &["title", "job_title", "name", "position"];
const COMPANY_KEYS: &[&str] = &["company", "company_name", "organization"];
const LOCATION_KEYS: &[&str] = &["location", "city", "locations_derived"];
const DESCRIPTION_KEYS: &[&str] = &["description", "job_description", "summary"];
const URL_KEYS: &[&str] = &["url", "redirect_url", "apply_url", "apply_link", "link"];
const LIST_KEYS: &[&str] = &["results", "jobs", "data", "items"];

pub const APPLY_LINK_PLACEHOLDER: &str = "#";

/// Pulls the list of raw job records out of a response body, which may be a
/// bare array or an object wrapping one.
pub fn extract_records(body: &Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items.clone(),
        Value::Object(map) => LIST_KEYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array))
            .cloned()
            .unwrap_or_default(),
        _ => vec![],
    }
}

/// Converts one raw record. Never fails; unknown shapes yield empty fields.
pub fn normalize_record(record: &Value) -> Job {
    let apply_link = first_text(record, URL_KEYS);
    Job {
        title: first_text(record, TITLE_KEYS),
        company: first_text(record, COMPANY_KEYS),
        location: first_text(record, LOCATION_KEYS),
        description: first_text(record, DESCRIPTION_KEYS),
        apply_link: if apply_link.is_empty() {
            APPLY_LINK_PLACEHOLDER.to_string()
        } else {
            apply_link
        },
    }
}

fn first_text(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .map(value_text)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Flat strings pass through; nested objects use `display_name` then `name`;
/// arrays are joined with ", ".
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => ["display_name", "name", "city"]
            .iter()
            .filter_map(|k| map.get(*k))
            .map(value_text)
            .find(|s| !s.is_empty())
            .unwrap_or_default(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Accumulates canonical jobs, keeping the first occurrence of each
/// (title, company, location) triple. Owned by a single fetch call.
#[derive(Debug, Default)]
pub struct JobCollector {
    seen: HashSet<(String, String, String)>,
    jobs: Vec<Job>,
}

impl JobCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the job was new.
    pub fn push(&mut self, job: Job) -> bool {
        if self.seen.insert(job.dedupe_key()) {
            self.jobs.push(job);
            true
        } else {
            false
        }
    }

    /// Returns the number of jobs added.
    pub fn extend(&mut self, jobs: impl IntoIterator<Item = Job>) -> usize {
        let mut added = 0;
        for job in jobs {
            if self.push(job) {
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn into_jobs(self) -> Vec<Job> {
        self.jobs
    }
}

/// Normalizes and deduplicates raw records in one pass.
pub fn normalize_records(records: &[Value]) -> Vec<Job> {
    let mut collector = JobCollector::new();
    collector.extend(records.iter().map(normalize_record));
    collector.into_jobs()
}
