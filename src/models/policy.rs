use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RecordId;
use crate::screen::search::Searchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub has_attachment: Option<Value>,
}

impl Policy {
    pub fn has_attachment(&self) -> bool {
        match &self.has_attachment {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        }
    }
}

impl Searchable for Policy {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.published_at.as_deref());
        fields
    }
}
