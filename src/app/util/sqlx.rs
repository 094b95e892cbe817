use std::borrow::Cow;

use sqlx::error::DatabaseError;

#[non_exhaustive]
pub struct SqlStateCodes;

impl SqlStateCodes {
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
}

pub fn get_code_from_db_err(db_err: &dyn DatabaseError) -> Option<String> {
    db_err.code().map(Cow::into_owned)
}
