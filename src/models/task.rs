use serde::{Deserialize, Serialize};

use super::{ref_name, EmployeeRef, RecordId};
use crate::screen::search::Searchable;

/// Team task, as listed by `/team-tasks/{daily,overall}` and shown by `/team-tasks/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTask {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<EmployeeRef>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Searchable for TeamTask {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.title.as_deref().into_iter().collect();
        fields.extend(ref_name(&self.assigned_to));
        fields.extend(self.date.as_deref());
        fields
    }
}
