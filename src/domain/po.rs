use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    // TIMESTAMP without time zone; rendered as UTC at the wire boundary.
    pub created_at: chrono::NaiveDateTime,
}
