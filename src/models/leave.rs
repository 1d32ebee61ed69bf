use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ref_name, EmployeeRef, RecordId};
use crate::screen::search::Searchable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaveType {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub paid_or_unpaid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: RecordId,
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
    #[serde(default)]
    pub leave_type: Option<LeaveType>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub number_of_days: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Searchable for LeaveRequest {
    fn search_fields(&self) -> Vec<&str> {
        ref_name(&self.employee).into_iter().collect()
    }
}
