use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Role given to users registered without an explicit one; mirrors the column default.
pub const DEFAULT_ROLE: &str = "user";

/// Severity value singled out by the high-severity report.
pub const HIGH_SEVERITY: &str = "High";

/// A row of `cyber_incidents`
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Incident {
    pub id: i64,
    pub date: String,
    pub incident_type: String,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    /// Username of the reporter. Not enforced against `users`.
    pub reported_by: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// The fields supplied when recording a new incident
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone)]
pub struct NewIncident {
    pub date: String,
    pub incident_type: String,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub reported_by: Option<String>,
}

impl NewIncident {
    pub fn new(date: impl Into<String>, incident_type: impl Into<String>) -> Self {
        NewIncident {
            date: date.into(),
            incident_type: incident_type.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_reported_by(mut self, username: impl Into<String>) -> Self {
        self.reported_by = Some(username.into());
        self
    }
}

/// A row of `it_tickets`
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Ticket {
    pub id: i64,
    /// The business identifier, e.g. `TCK-1001`
    pub ticket_id: String,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub subject: String,
    pub description: Option<String>,
    pub created_date: Option<String>,
    pub resolved_date: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone)]
pub struct NewTicket {
    pub ticket_id: String,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub subject: String,
    pub description: Option<String>,
    pub created_date: Option<String>,
    pub resolved_date: Option<String>,
    pub assigned_to: Option<String>,
}

impl NewTicket {
    pub fn new(ticket_id: impl Into<String>, subject: impl Into<String>) -> Self {
        NewTicket {
            ticket_id: ticket_id.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_created_date(mut self, created_date: impl Into<String>) -> Self {
        self.created_date = Some(created_date.into());
        self
    }

    #[must_use]
    pub fn with_resolved_date(mut self, resolved_date: impl Into<String>) -> Self {
        self.resolved_date = Some(resolved_date.into());
        self
    }

    #[must_use]
    pub fn with_assigned_to(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }
}

/// A row of `users`.
///
/// The password hash is never serialized, so listings can be handed to a UI as is.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Option<NaiveDateTime>,
}

/// A user about to be stored. `password_hash` must already be hashed,
/// see `SqliteRepository::<UserTable>::register()` for the plaintext path.
#[derive(Debug, PartialEq, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        NewUser {
            username: username.into(),
            password_hash: password_hash.into(),
            role: DEFAULT_ROLE.to_string(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// One line of an aggregate report: the grouping value and the number of rows in it.
///
/// `group` is `None` for rows where the grouped column is NULL.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct GroupCount {
    pub group: Option<String>,
    pub count: i64,
}

impl GroupCount {
    pub fn new(group: impl Into<String>, count: i64) -> Self {
        GroupCount {
            group: Some(group.into()),
            count,
        }
    }
}

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parses the textual timestamps found in `created_at` columns.
///
/// `CURRENT_TIMESTAMP` gives `YYYY-MM-DD HH:MM:SS`; bulk loaded rows may carry other
/// formats, in which case the value is treated as absent.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_utc()))
}
