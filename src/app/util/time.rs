use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_time_in_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or_default()
}
