//! Descriptors for every HRMS endpoint a screen reads from.
//!
//! A `Resource` is the full dependency set of a screen: two descriptors
//! that compare equal fetch the same data.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::envelope::{EnvelopePolicy, PayloadShape};

/// Request rejected before it is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("No data available for future months")]
    FutureMonth,
}

impl EndpointError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EndpointError::InvalidMonth(_) => "INVALID_MONTH",
            EndpointError::FutureMonth => "FUTURE_MONTH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub path: String,
    pub params: Vec<(String, String)>,
    /// Noun used in "Failed to fetch ..." messages
    pub label: &'static str,
    pub shape: PayloadShape,
    pub envelope: EnvelopePolicy,
    pub collection: bool,
    pub paginated: bool,
}

impl Resource {
    fn list(path: impl Into<String>, label: &'static str) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
            label,
            shape: PayloadShape::Data,
            envelope: EnvelopePolicy::Strict,
            collection: true,
            paginated: false,
        }
    }

    fn detail(path: impl Into<String>, label: &'static str) -> Self {
        Self {
            collection: false,
            ..Self::list(path, label)
        }
    }

    fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    fn param_unless(self, key: &str, value: &str, sentinel: &str) -> Self {
        if value.eq_ignore_ascii_case(sentinel) {
            self
        } else {
            self.param(key, value)
        }
    }

    fn lenient(mut self) -> Self {
        self.envelope = EnvelopePolicy::Lenient;
        self
    }

    fn nested(mut self) -> Self {
        self.shape = PayloadShape::NestedData;
        self
    }

    /// Query parameters for a given page of a paginated resource
    pub fn params_for_page(&self, page: Option<u32>) -> Vec<(String, String)> {
        let mut params = self.params.clone();
        if let Some(page) = page.filter(|_| self.paginated) {
            params.push(("page".to_string(), page.to_string()));
        }
        params
    }
}

pub fn dashboard() -> Resource {
    Resource::detail("/dashboard", "dashboard data")
}

pub fn employees() -> Resource {
    Resource::list("/employees", "employees")
}

pub fn employee(id: &str) -> Resource {
    Resource::detail(format!("/employees/{}", id), "employee details")
}

fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn attendance_daily(date: NaiveDate) -> Resource {
    Resource::list("/attendance/daily", "attendance").param("date", ymd(date))
}

/// Attendance between two dates, for one employee or for everyone
pub fn attendance_filter(employee_id: Option<&str>, start: NaiveDate, end: NaiveDate) -> Resource {
    let base = Resource::list("/attendance/filter", "attendance");
    match employee_id {
        Some(id) => base
            .param("employee_id", id)
            .param("start_date", ymd(start))
            .param("end_date", ymd(end)),
        None => base.param("date", ymd(start)).param("end_date", ymd(end)),
    }
}

/// Monthly grid; `Err` when the month lies in the future relative to `today`
pub fn attendance_monthly(month: u32, year: i32, today: NaiveDate) -> Result<Resource, EndpointError> {
    if !(1..=12).contains(&month) {
        return Err(EndpointError::InvalidMonth(month));
    }
    if year > today.year() || (year == today.year() && month > today.month()) {
        return Err(EndpointError::FutureMonth);
    }

    let mut resource = Resource::list("/attendance/monthly", "attendance")
        .param("month", month)
        .param("year", year)
        .lenient();
    resource.shape = PayloadShape::Whole;
    resource.collection = false;
    Ok(resource)
}

/// Shift schedule; "All" leaves a filter out
pub fn rosters(status: &str, day: &str) -> Resource {
    Resource::list("/rosters", "roster data")
        .param_unless("status", status, "all")
        .param_unless("day", day, "all")
}

pub fn leave_requests(status: &str) -> Resource {
    Resource::list("/leave-requests", "leave requests")
        .param_unless("status", status, "all")
        .nested()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    Daily,
    Overall,
}

impl TaskScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskScope::Daily => "daily",
            TaskScope::Overall => "overall",
        }
    }
}

pub fn team_tasks(scope: TaskScope, status: &str) -> Resource {
    let mut resource = Resource::list(format!("/team-tasks/{}", scope.as_str()), "tasks").param("status", status);
    resource.paginated = true;
    resource
}

pub fn team_task(id: &str) -> Resource {
    Resource::detail(format!("/team-tasks/{}", id), "task details")
}

pub fn training(status: &str) -> Resource {
    Resource::list("/training", "trainings")
        .param_unless("status", status, "all")
        .nested()
}

pub fn training_for_employee(employee_id: &str) -> Resource {
    let mut resource = Resource::detail(format!("/training/employee/{}", employee_id), "training details").lenient();
    resource.shape = PayloadShape::Whole;
    resource
}

pub fn announcements() -> Resource {
    Resource::list("/announcements", "announcements").lenient()
}

pub fn announcement(id: &str) -> Resource {
    Resource::detail(format!("/announcements/{}", id), "announcement details").lenient()
}

pub fn policies() -> Resource {
    Resource::list("/policies", "policies").lenient()
}

pub fn policy(id: &str) -> Resource {
    Resource::detail(format!("/policies/{}", id), "policy details").lenient()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_all_filters_are_omitted() {
        let resource = rosters("All", "All");
        assert!(resource.params.is_empty());

        let resource = rosters("Onsite", "Monday");
        assert_eq!(
            resource.params,
            vec![("status".to_string(), "Onsite".to_string()), ("day".to_string(), "Monday".to_string())]
        );

        assert!(leave_requests("all").params.is_empty());
        assert_eq!(leave_requests("today_only").shape, PayloadShape::NestedData);
    }

    #[test]
    fn test_attendance_filter_params() {
        let one = attendance_filter(Some("12"), date(2024, 3, 1), date(2024, 3, 5));
        assert_eq!(one.params[0], ("employee_id".to_string(), "12".to_string()));
        assert_eq!(one.params[1], ("start_date".to_string(), "2024-03-01".to_string()));

        let everyone = attendance_filter(None, date(2024, 3, 1), date(2024, 3, 5));
        assert_eq!(everyone.params[0], ("date".to_string(), "2024-03-01".to_string()));
        assert_eq!(everyone.params[1], ("end_date".to_string(), "2024-03-05".to_string()));
    }

    #[test]
    fn test_future_month_rejected() {
        let today = date(2024, 6, 15);
        assert!(attendance_monthly(6, 2024, today).is_ok());
        let err = attendance_monthly(7, 2024, today).unwrap_err();
        assert_eq!(err, EndpointError::FutureMonth);
        assert_eq!(err.to_string(), "No data available for future months");
        assert_eq!(attendance_monthly(1, 2025, today).unwrap_err(), EndpointError::FutureMonth);
        assert_eq!(attendance_monthly(13, 2023, today).unwrap_err(), EndpointError::InvalidMonth(13));
    }

    #[test]
    fn test_page_param_only_for_paginated() {
        let tasks = team_tasks(TaskScope::Daily, "in_progress");
        assert_eq!(tasks.path, "/team-tasks/daily");
        assert!(tasks.params_for_page(Some(2)).contains(&("page".to_string(), "2".to_string())));

        let people = employees();
        assert_eq!(people.params_for_page(Some(2)), Vec::<(String, String)>::new());
    }
}
