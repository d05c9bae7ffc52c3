//! Loading story records from JSON input files.
//!
//! The batch input is a JSON document containing a list of records,
//! each with optional `user_story`, `deliverables`, and `issue_type`
//! keys. Structural problems surface here, before any network work.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::batch::StoryRecord;
use crate::error::Result;

/// Read and parse the records list from `path`.
///
/// Fails if the file cannot be read or does not contain a JSON list
/// of records.
pub fn load_records(path: &Path) -> Result<Vec<StoryRecord>> {
    let raw = fs::read_to_string(path)?;
    let records: Vec<StoryRecord> = serde_json::from_str(&raw)?;

    info!(
        count = records.len(),
        path = %path.display(),
        "loaded story records"
    );
    Ok(records)
}

/// Count the records carrying both required fields, warning about the
/// rest.
///
/// A return of zero means there is nothing to submit and the run can
/// stop before touching the network.
pub fn preflight(records: &[StoryRecord]) -> usize {
    let mut submittable = 0;

    for (idx, record) in records.iter().enumerate() {
        if record.is_submittable() {
            submittable += 1;
        } else {
            warn!(entry = idx + 1, "record is missing required fields");
        }
    }

    info!(
        "{}/{} records carry both user_story and deliverables",
        submittable,
        records.len()
    );
    submittable
}
