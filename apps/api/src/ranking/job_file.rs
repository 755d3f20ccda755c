//! Parsing of caller-uploaded job lists (CSV or JSON) into canonical jobs.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::providers::normalize::{extract_records, normalize_records};
use crate::providers::Job;

#[derive(Debug, Error)]
pub enum JobFileError {
    #[error("Jobs file is not valid UTF-8")]
    Encoding,

    #[error("Jobs file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Jobs file is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("No jobs could be parsed from the jobs file")]
    NoJobs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobFileFormat {
    Json,
    Csv,
}

impl JobFileFormat {
    /// `.json`/`.csv` extensions win; otherwise a leading `[` or `{` means JSON.
    fn detect(file_name: &str, body: &str) -> Self {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".json") {
            Self::Json
        } else if lower.ends_with(".csv") {
            Self::Csv
        } else if body.trim_start().starts_with(['[', '{']) {
            Self::Json
        } else {
            Self::Csv
        }
    }
}

/// Parses an uploaded jobs file. Column and key names follow the provider
/// field variants (`title`/`job_title`, `apply_link`/`url`, ...). Rows with
/// neither a title nor a description are skipped; duplicates are dropped.
pub fn parse_jobs_file(file_name: &str, bytes: &[u8]) -> Result<Vec<Job>, JobFileError> {
    let body = std::str::from_utf8(bytes).map_err(|_| JobFileError::Encoding)?;
    let body = body.trim_start_matches('\u{feff}');

    let records = match JobFileFormat::detect(file_name, body) {
        JobFileFormat::Json => extract_records(&serde_json::from_str::<Value>(body)?),
        JobFileFormat::Csv => csv_records(body)?,
    };

    let jobs: Vec<Job> = normalize_records(&records)
        .into_iter()
        .filter(|j| !j.title.is_empty() || !j.description.is_empty())
        .collect();

    if jobs.is_empty() {
        return Err(JobFileError::NoJobs);
    }
    Ok(jobs)
}

/// Each CSV row becomes a JSON object keyed by the lowercased header.
fn csv_records(body: &str) -> Result<Vec<Value>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let object: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), Value::String(v.to_string())))
            .collect();
        records.push(Value::Object(object));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "title,company,location,description,apply_link\n\
        Quant Intern,Alpha,Mumbai,Stochastic calculus,https://alpha.example/apply\n\
        Chip Intern,Beta,Pune,Verilog and FPGA,\n";

    #[test]
    fn test_csv_rows_become_jobs() {
        let jobs = parse_jobs_file("jobs.csv", CSV.as_bytes()).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Quant Intern");
        assert_eq!(jobs[1].location, "Pune");
    }

    #[test]
    fn test_apply_link_column_and_placeholder() {
        let jobs = parse_jobs_file("jobs.csv", CSV.as_bytes()).unwrap();
        assert_eq!(jobs[0].apply_link, "https://alpha.example/apply");
        assert_eq!(jobs[1].apply_link, "#");
    }

    #[test]
    fn test_json_array() {
        let body = r#"[{"job_title": "Data Intern", "company_name": "Gamma", "summary": "SQL"}]"#;
        let jobs = parse_jobs_file("upload", body.as_bytes()).unwrap();
        assert_eq!(jobs[0].title, "Data Intern");
        assert_eq!(jobs[0].company, "Gamma");
        assert_eq!(jobs[0].description, "SQL");
    }

    #[test]
    fn test_json_wrapped_list() {
        let body = r#"{"jobs": [{"title": "A"}, {"title": "a"}]}"#;
        let jobs = parse_jobs_file("jobs.json", body.as_bytes()).unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn test_header_case_and_bom() {
        let body = "\u{feff}Title,Company\nOps Intern,Delta\n";
        let jobs = parse_jobs_file("jobs.csv", body.as_bytes()).unwrap();
        assert_eq!(jobs[0].title, "Ops Intern");
    }

    #[test]
    fn test_no_usable_rows_is_error() {
        let body = "foo,bar\n1,2\n";
        assert!(matches!(
            parse_jobs_file("jobs.csv", body.as_bytes()),
            Err(JobFileError::NoJobs)
        ));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            parse_jobs_file("jobs.json", b"{not json"),
            Err(JobFileError::Json(_))
        ));
    }
}
