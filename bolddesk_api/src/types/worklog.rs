use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IdName, TicketID};

/// Numeric identifier for a worklog entry.
pub type WorklogID = i64;

/// Time logged against a ticket.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worklog {
    pub id: WorklogID,
    #[serde(default)]
    pub ticket_id: TicketID,
    /// Time spent, in minutes.
    #[serde(default)]
    pub time_spent: u32,
    pub description: Option<String>,
    #[serde(default)]
    pub is_billable: bool,
    pub log_date: Option<DateTime<Utc>>,
    pub agent: Option<IdName>,
}

impl Worklog {
    /// `"1h 30m"` style rendering of `time_spent`.
    pub fn time_spent_display(&self) -> String {
        let hours = self.time_spent / 60;
        let minutes = self.time_spent % 60;
        match (hours, minutes) {
            (0, m) => format!("{}m", m),
            (h, 0) => format!("{}h", h),
            (h, m) => format!("{}h {}m", h, m),
        }
    }
}

/// Body for `POST /tickets/{id}/worklogs`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogCreate {
    pub time_spent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_billable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_date: Option<DateTime<Utc>>,
}

/// Body for `PUT /tickets/{id}/worklogs/{worklogId}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billable: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::Worklog;

    #[test]
    fn time_spent_display() {
        let mut w = Worklog::default();
        for (minutes, expected) in [(0, "0m"), (45, "45m"), (120, "2h"), (95, "1h 35m")] {
            w.time_spent = minutes;
            assert_eq!(w.time_spent_display(), expected);
        }
    }
}
