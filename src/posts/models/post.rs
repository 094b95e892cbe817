use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::app::util::time;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Post {
    /// Builds an unsaved post stamped with the current time. The id is
    /// assigned by the store on insert.
    pub fn new(title: &str, content: &str) -> Self {
        let current_time = time::current_time_in_millis();

        Self {
            id: 0,
            title: title.to_string(),
            content: content.to_string(),
            created_at: current_time,
            updated_at: current_time,
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
