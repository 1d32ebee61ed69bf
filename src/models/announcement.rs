use serde::{Deserialize, Serialize};

use super::RecordId;
use crate::screen::search::Searchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub target_team: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Searchable for Announcement {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}
