use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RecordId;
use crate::screen::search::Searchable;

/// Row from `/attendance/daily` and `/attendance/filter`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub employee_id: Option<RecordId>,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub total_hours: Option<Value>,
    #[serde(default)]
    pub on_time_status: Option<String>,
    #[serde(default)]
    pub roster_start: Option<String>,
    #[serde(default)]
    pub roster_end: Option<String>,
}

impl Searchable for AttendanceRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.employee_name.as_str()]
    }
}

/// One employee's row of the monthly grid; each date label maps to a status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAttendanceRow {
    #[serde(default)]
    pub employee_id: Option<RecordId>,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub exists: Option<String>,
    #[serde(flatten)]
    pub days: Map<String, Value>,
}

impl MonthlyAttendanceRow {
    pub fn is_active(&self) -> bool {
        self.exists.as_deref() == Some("yes")
    }

    /// Status for a date label such as "01,Mon"; "unknown" when absent
    pub fn status_on(&self, date_label: &str) -> &str {
        self.days.get(date_label).and_then(Value::as_str).unwrap_or("unknown")
    }
}

impl Searchable for MonthlyAttendanceRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.employee_name.as_str()]
    }
}

/// Body of `GET /attendance/monthly`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAttendance {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub data: Vec<MonthlyAttendanceRow>,
}
