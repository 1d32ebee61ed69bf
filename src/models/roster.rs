use serde::{Deserialize, Serialize};

use super::{ref_name, EmployeeRef, RecordId};
use crate::screen::search::Searchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: RecordId,
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Searchable for RosterEntry {
    fn search_fields(&self) -> Vec<&str> {
        ref_name(&self.employee).into_iter().collect()
    }
}
