use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ref_name, EmployeeRef, RecordId};
use crate::screen::search::Searchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub id: RecordId,
    #[serde(default)]
    pub program_title: Option<String>,
    #[serde(default)]
    pub training_type: Option<String>,
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub approval_status: Option<String>,
    #[serde(default)]
    pub completion_status: Option<String>,
    #[serde(default)]
    pub certification_received: Option<Value>,
}

impl Searchable for TrainingRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.program_title.as_deref().into_iter().collect();
        fields.extend(ref_name(&self.employee));
        fields.extend(self.training_type.as_deref());
        fields
    }
}

/// Body of `GET /training/employee/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeTrainingHistory {
    #[serde(default)]
    pub data: Vec<TrainingRecord>,
}

impl EmployeeTrainingHistory {
    fn count_completion(&self, status: &str) -> usize {
        self.data
            .iter()
            .filter(|t| t.completion_status.as_deref() == Some(status))
            .count()
    }

    pub fn completed(&self) -> usize {
        self.count_completion("Completed")
    }

    pub fn pending(&self) -> usize {
        self.count_completion("Pending")
    }
}
