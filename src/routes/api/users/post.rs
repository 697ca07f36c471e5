use actix_web::{HttpResponse, post, web};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::api::{ApiError, ApiResult};
use crate::dao::{StoreError, find_user_by_email, insert_user};
use crate::domain::dto::{CreateUserRequest, NewUser, UserDto};

#[derive(Serialize)]
struct CreatedUserResponse {
    user: UserDto,
}

#[post("/users")]
pub async fn users_post(
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult {
    let new_user = NewUser::try_from(payload.into_inner()).map_err(|e| {
        tracing::warn!(error = %e, "Rejected user payload");
        ApiError::Validation("Invalid request body".into())
    })?;

    tracing::debug!(name = %new_user.name, email = %new_user.email, "Creating new user");

    // Pre-check gives the friendly 409; the unique constraint is the backstop
    // for the race between two concurrent creations.
    let existing = find_user_by_email(&new_user.email, &db_pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error checking for existing email");
            ApiError::Database("Failed to create user".into())
        })?;
    if existing.is_some() {
        tracing::warn!(email = %new_user.email, "User with this email already exists");
        return Err(ApiError::Conflict(
            "User with this email already exists".into(),
        ));
    }

    let user = match insert_user(&new_user, &db_pool).await {
        Ok(user) => user,
        Err(StoreError::DuplicateEmail) => {
            tracing::warn!(email = %new_user.email, "Lost creation race for email");
            return Err(ApiError::Conflict(
                "User with this email already exists".into(),
            ));
        }
        Err(e) => {
            tracing::error!(error = %e, "Error creating user");
            return Err(ApiError::Database("Failed to create user".into()));
        }
    };

    tracing::info!(user_id = user.id, "User created successfully");
    Ok(HttpResponse::Created().json(CreatedUserResponse { user }))
}
