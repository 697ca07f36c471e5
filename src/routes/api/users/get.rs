use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::api::{ApiError, ApiResult};
use crate::dao::list_users;
use crate::domain::dto::UserDto;

#[derive(Serialize)]
struct UsersResponse {
    users: Vec<UserDto>,
}

#[get("/users")]
pub async fn users_get(db_pool: web::Data<PgPool>) -> ApiResult {
    tracing::debug!("Getting users list");

    let users = list_users(&db_pool).await.map_err(|e| {
        tracing::error!(error = %e, "Error querying users");
        ApiError::Database("Failed to fetch users".into())
    })?;

    tracing::info!(count = users.len(), "Users retrieved successfully");
    Ok(HttpResponse::Ok().json(UsersResponse { users }))
}
