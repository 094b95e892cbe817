use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::app::util::time;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "post")]
    pub post_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Comment {
    pub fn new(post_id: i64, author: &str, content: &str) -> Self {
        let current_time = time::current_time_in_millis();

        Self {
            id: 0,
            post_id,
            author: author.to_string(),
            content: content.to_string(),
            created_at: current_time,
            updated_at: current_time,
        }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} commented", self.author)
    }
}
