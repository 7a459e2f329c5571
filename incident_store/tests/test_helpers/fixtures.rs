// incident_store/tests/test_helpers/fixtures.rs

use std::fs;
use std::path::{Path, PathBuf};

pub const TICKET_HEADER: &str =
    "ticket_id,priority,status,category,subject,description,created_date,resolved_date,assigned_to";
pub const INCIDENT_HEADER: &str = "date,incident_type,severity,status,description,reported_by";

/// Writes `header` followed by `rows` into `dir/name` and returns the path
pub fn write_csv(dir: &Path, name: &str, header: &str, rows: &[String]) -> PathBuf {
    let mut contents = String::from(header);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    let path = dir.join(name);
    fs::write(&path, contents).expect("Unable to write CSV fixture");
    path
}

/// `count` well formed ticket rows, `TCK-1000`, `TCK-1001` ...
pub fn ticket_rows(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let priority = ["Low", "Medium", "High"][i % 3];
            let resolved = if i % 2 == 0 { "2024-06-03" } else { "" };
            let ticket_id = 1000 + i;
            let agent = i % 4;
            format!(
                "TCK-{ticket_id},{priority},Open,Hardware,Subject {i},Description {i},\
                 2024-06-01,{resolved},agent{agent}"
            )
        })
        .collect()
}

/// `count` incident rows of the given type
pub fn incident_rows(
    incident_type: &str,
    severity: &str,
    status: &str,
    count: usize,
) -> Vec<String> {
    (0..count)
        .map(|i| {
            let day = 1 + i % 28;
            format!("2024-10-{day:02},{incident_type},{severity},{status},Case {i},analyst")
        })
        .collect()
}
