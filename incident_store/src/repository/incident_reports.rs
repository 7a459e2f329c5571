use crate::error::StoreError;
use crate::types::GroupCount;

/// Used by `types_with_many_cases()` when the caller has no threshold of its own
pub const DEFAULT_MIN_CASES: i64 = 5;

/// Aggregate queries over the incidents.
///
/// All reports are ordered by count, largest first, with ties broken by the
/// group value so the output is stable.
pub trait IncidentReports {
    /// Number of incidents per incident type
    ///
    /// # Errors
    /// Returns a `StoreError` if the query fails
    fn count_by_type(&self) -> Result<Vec<GroupCount>, StoreError>;

    /// Number of incidents with severity `High`, per status
    ///
    /// # Errors
    /// Returns a `StoreError` if the query fails
    fn high_severity_by_status(&self) -> Result<Vec<GroupCount>, StoreError>;

    /// Incident types with strictly more than `min_count` incidents
    ///
    /// # Errors
    /// Returns a `StoreError` if the query fails
    fn types_with_many_cases(&self, min_count: i64) -> Result<Vec<GroupCount>, StoreError>;
}
