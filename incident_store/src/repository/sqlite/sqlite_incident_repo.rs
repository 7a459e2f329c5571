use rusqlite::types::ToSql;
use rusqlite::{params, Row};

use crate::error::StoreError;
use crate::repository::incident_reports::IncidentReports;
use crate::repository::sqlite::sqlite_repository::{
    timestamp_column, SqliteRepository, TableSchema,
};
use crate::types::{GroupCount, Incident, NewIncident, HIGH_SEVERITY};

/// `cyber_incidents`, addressed by the numeric id and listed newest first
pub struct IncidentTable;

pub type SqliteIncidentRepository = SqliteRepository<IncidentTable>;

impl TableSchema for IncidentTable {
    type Record = Incident;
    type NewRecord = NewIncident;
    type Key = i64;

    const TABLE: &'static str = "cyber_incidents";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "date",
        "incident_type",
        "severity",
        "status",
        "description",
        "reported_by",
        "created_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "date",
        "incident_type",
        "severity",
        "status",
        "description",
        "reported_by",
    ];
    const KEY_COLUMN: &'static str = "id";
    const MUTABLE_COLUMN: &'static str = "status";
    const ORDER_BY: &'static str = "id DESC";

    fn insert_params(incident: &NewIncident) -> Vec<&dyn ToSql> {
        vec![
            &incident.date as &dyn ToSql,
            &incident.incident_type,
            &incident.severity,
            &incident.status,
            &incident.description,
            &incident.reported_by,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Incident> {
        Ok(Incident {
            id: row.get(0)?,
            date: row.get(1)?,
            incident_type: row.get(2)?,
            severity: row.get(3)?,
            status: row.get(4)?,
            description: row.get(5)?,
            reported_by: row.get(6)?,
            created_at: timestamp_column(row, 7)?,
        })
    }
}

const COUNT_BY_TYPE_SQL: &str = r"
    SELECT incident_type, COUNT(*) AS count
    FROM cyber_incidents
    GROUP BY incident_type
    ORDER BY count DESC, incident_type ASC
";

const SEVERITY_BY_STATUS_SQL: &str = r"
    SELECT status, COUNT(*) AS count
    FROM cyber_incidents
    WHERE severity = ?1
    GROUP BY status
    ORDER BY count DESC, status ASC
";

const TYPES_WITH_MANY_CASES_SQL: &str = r"
    SELECT incident_type, COUNT(*) AS count
    FROM cyber_incidents
    GROUP BY incident_type
    HAVING COUNT(*) > ?1
    ORDER BY count DESC, incident_type ASC
";

impl SqliteIncidentRepository {
    fn group_counts(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<Vec<GroupCount>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let groups = stmt
            .query_map(params, |row| {
                Ok(GroupCount {
                    group: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }
}

impl IncidentReports for SqliteIncidentRepository {
    fn count_by_type(&self) -> Result<Vec<GroupCount>, StoreError> {
        self.group_counts(COUNT_BY_TYPE_SQL, &[])
    }

    fn high_severity_by_status(&self) -> Result<Vec<GroupCount>, StoreError> {
        self.group_counts(SEVERITY_BY_STATUS_SQL, params![HIGH_SEVERITY])
    }

    fn types_with_many_cases(&self, min_count: i64) -> Result<Vec<GroupCount>, StoreError> {
        self.group_counts(TYPES_WITH_MANY_CASES_SQL, params![min_count])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::incident_reports::DEFAULT_MIN_CASES;
    use crate::repository::record_repository::RecordRepository;
    use crate::repository::sqlite::tests::test_database_manager;

    fn record(
        repo: &SqliteIncidentRepository,
        incident_type: &str,
        severity: &str,
        status: &str,
    ) -> Result<i64, StoreError> {
        repo.insert(
            &NewIncident::new("2024-11-03", incident_type)
                .with_severity(severity)
                .with_status(status),
        )
    }

    #[test]
    fn insert_then_get_all_returns_the_incident() -> Result<(), StoreError> {
        let incident_repo = test_database_manager()?.create_incident_repository();
        let new_incident = NewIncident::new("2024-11-03", "Phishing")
            .with_severity("High")
            .with_status("Open")
            .with_description("Credential harvesting mail to finance")
            .with_reported_by("alice");

        let id = incident_repo.insert(&new_incident)?;

        let incidents = incident_repo.get_all()?;
        let matching: Vec<&Incident> = incidents.iter().filter(|i| i.id == id).collect();
        assert_eq!(1, matching.len());
        let incident = matching[0];
        assert_eq!(new_incident.date, incident.date);
        assert_eq!(new_incident.incident_type, incident.incident_type);
        assert_eq!(new_incident.severity, incident.severity);
        assert_eq!(new_incident.status, incident.status);
        assert_eq!(new_incident.description, incident.description);
        assert_eq!(new_incident.reported_by, incident.reported_by);
        Ok(())
    }

    #[test]
    fn get_all_lists_newest_first() -> Result<(), StoreError> {
        let incident_repo = test_database_manager()?.create_incident_repository();
        let first = record(&incident_repo, "Malware", "Low", "Open")?;
        let second = record(&incident_repo, "Phishing", "High", "Open")?;

        let ids: Vec<i64> = incident_repo.get_all()?.iter().map(|i| i.id).collect();
        assert_eq!(vec![second, first], ids);
        Ok(())
    }

    #[test]
    fn reporter_does_not_have_to_exist() -> Result<(), StoreError> {
        let incident_repo = test_database_manager()?.create_incident_repository();
        let id = incident_repo
            .insert(&NewIncident::new("2024-11-03", "DDoS").with_reported_by("nobody"))?;
        assert!(incident_repo.find_by_key(&id)?.is_some());
        Ok(())
    }

    #[test]
    fn unknown_id_updates_and_deletes_nothing() -> Result<(), StoreError> {
        let incident_repo = test_database_manager()?.create_incident_repository();
        let id = record(&incident_repo, "Malware", "Low", "Open")?;

        assert_eq!(0, incident_repo.update_status(&(id + 100), "Closed")?);
        assert_eq!(0, incident_repo.delete(&(id + 100))?);

        let incident = incident_repo.find_by_key(&id)?.expect("incident should still exist");
        assert_eq!(Some("Open".to_string()), incident.status);

        assert_eq!(1, incident_repo.update_status(&id, "Closed")?);
        assert_eq!(1, incident_repo.delete(&id)?);
        assert_eq!(0, incident_repo.count()?);
        Ok(())
    }

    #[test]
    fn ids_are_not_reused_after_delete() -> Result<(), StoreError> {
        let incident_repo = test_database_manager()?.create_incident_repository();
        let first = record(&incident_repo, "Malware", "Low", "Open")?;
        incident_repo.delete(&first)?;
        let second = record(&incident_repo, "Malware", "Low", "Open")?;
        assert!(second > first);
        Ok(())
    }

    #[test]
    fn high_severity_by_status() -> Result<(), StoreError> {
        let incident_repo = test_database_manager()?.create_incident_repository();
        for _ in 0..3 {
            record(&incident_repo, "Phishing", "High", "Open")?;
        }
        record(&incident_repo, "Phishing", "High", "Closed")?;
        record(&incident_repo, "Malware", "Low", "Closed")?;

        let report = incident_repo.high_severity_by_status()?;
        assert_eq!(vec![GroupCount::new("Open", 3), GroupCount::new("Closed", 1)], report);
        Ok(())
    }

    #[test]
    fn count_by_type_breaks_ties_by_name() -> Result<(), StoreError> {
        let incident_repo = test_database_manager()?.create_incident_repository();
        record(&incident_repo, "Ransomware", "High", "Open")?;
        record(&incident_repo, "Malware", "Low", "Open")?;
        record(&incident_repo, "Phishing", "Medium", "Open")?;
        record(&incident_repo, "Phishing", "Medium", "Closed")?;

        let report = incident_repo.count_by_type()?;
        assert_eq!(
            vec![
                GroupCount::new("Phishing", 2),
                GroupCount::new("Malware", 1),
                GroupCount::new("Ransomware", 1)
            ],
            report
        );
        Ok(())
    }

    #[test]
    fn types_with_many_cases_uses_strict_threshold() -> Result<(), StoreError> {
        let incident_repo = test_database_manager()?.create_incident_repository();
        for _ in 0..6 {
            record(&incident_repo, "Phishing", "Medium", "Open")?;
        }
        for _ in 0..5 {
            record(&incident_repo, "DDoS", "High", "Open")?;
        }
        for _ in 0..3 {
            record(&incident_repo, "Malware", "Low", "Open")?;
        }

        let report = incident_repo.types_with_many_cases(DEFAULT_MIN_CASES)?;
        assert_eq!(vec![GroupCount::new("Phishing", 6)], report);

        let report = incident_repo.types_with_many_cases(2)?;
        assert_eq!(3, report.len());
        Ok(())
    }

    #[test]
    fn reports_on_empty_table_are_empty() -> Result<(), StoreError> {
        let incident_repo = test_database_manager()?.create_incident_repository();
        assert!(incident_repo.count_by_type()?.is_empty());
        assert!(incident_repo.high_severity_by_status()?.is_empty());
        Ok(())
    }
}
