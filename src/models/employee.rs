use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RecordId;
use crate::screen::search::Searchable;

/// Directory entry from `GET /employees`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    #[serde(default)]
    pub employee_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.designation.as_deref());
        fields.extend(self.department.as_deref());
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStats {
    #[serde(default)]
    pub present: u64,
    #[serde(default)]
    pub absent: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaveStats {
    #[serde(default)]
    pub approved: u64,
    #[serde(default)]
    pub paid: u64,
    #[serde(default)]
    pub unpaid: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeLeave {
    #[serde(default, rename = "type")]
    pub leave_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Full profile from `GET /employees/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetail {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub employee_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub date_of_joining: Option<String>,
    #[serde(default)]
    pub joining_salary: Option<Value>,
    #[serde(default)]
    pub is_blocked: Option<Value>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub attendance_stats: AttendanceStats,
    #[serde(default)]
    pub leave_stats: LeaveStats,
    #[serde(default)]
    pub leave_requests: Vec<EmployeeLeave>,
}
