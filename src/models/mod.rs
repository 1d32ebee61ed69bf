pub mod announcement;
pub mod attendance;
pub mod dashboard;
pub mod employee;
pub mod leave;
pub mod policy;
pub mod roster;
pub mod task;
pub mod training;
pub mod user;

pub use announcement::Announcement;
pub use attendance::{AttendanceRecord, MonthlyAttendance, MonthlyAttendanceRow};
pub use dashboard::DashboardSummary;
pub use employee::{Employee, EmployeeDetail};
pub use leave::LeaveRequest;
pub use policy::Policy;
pub use roster::RosterEntry;
pub use task::TeamTask;
pub use training::{EmployeeTrainingHistory, TrainingRecord};
pub use user::User;

use serde::{Deserialize, Serialize};

/// Record identifier; the HRMS API sends both numeric and string ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

/// Employee reference embedded in rosters, leave requests, tasks and trainings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRef {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Name of the embedded employee, when present
pub(crate) fn ref_name(employee: &Option<EmployeeRef>) -> Option<&str> {
    employee.as_ref().and_then(|e| e.name.as_deref())
}
