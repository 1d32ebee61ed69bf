use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceCounters {
    #[serde(default)]
    pub total_active_users: u64,
    #[serde(default)]
    pub total_present_users: u64,
    #[serde(default)]
    pub total_absent_users: u64,
    #[serde(default)]
    pub total_checkin_users: u64,
    #[serde(default)]
    pub total_late_checkin_users: u64,
    #[serde(default)]
    pub total_leave_requests: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskCounters {
    #[serde(default)]
    pub total_tasks_today: u64,
    #[serde(default)]
    pub total_tasks_in_progress: u64,
    #[serde(default)]
    pub total_tasks_completed: u64,
}

/// Summary counters from `GET /dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub attendance: AttendanceCounters,
    #[serde(default)]
    pub team_tasks: TaskCounters,
}
