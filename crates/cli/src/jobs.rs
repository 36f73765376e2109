//! Job-list loading.

use std::path::Path;

use cs_domain::job::JobList;

/// Load a `{"jobs": [...]}` document from disk.
pub fn load_jobs(path: &Path) -> anyhow::Result<JobList> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
    let list: JobList = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("parsing {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), jobs = list.jobs.len(), "job list loaded");
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_job_list() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"jobs": [{{"id": "a", "name": "first", "schedule": {{"kind": "every", "everyMs": 900000}}, "payload": {{"kind": "agentTurn", "message": "hi"}}}}]}}"#
        )
        .unwrap();
        let list = load_jobs(f.path()).unwrap();
        assert_eq!(list.jobs.len(), 1);
        assert_eq!(list.jobs[0].display_id(), "a");
        assert_eq!(list.jobs[0].schedule.every_ms, Some(900_000));
    }

    #[test]
    fn missing_file_is_an_error_naming_the_path() {
        let err = load_jobs(Path::new("/nonexistent/jobs.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/jobs.json"));
    }

    #[test]
    fn document_without_jobs_key_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"tasks": []}}"#).unwrap();
        assert!(load_jobs(f.path()).is_err());
    }
}
