//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::Json;
use taskboard_core::validation::{validate_email, validate_optional_email};
use taskboard_db::models::user::{CreateUser, UpdateUser, User};
use taskboard_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<Json<User>> {
    validate_email(&input.email)?;

    let user = UserRepo::create(&state.pool, &input).await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok(Json(user))
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(Json(user))
}

/// PUT /api/users/{id}
///
/// Applies only the fields present in the body. An empty body changes
/// nothing and returns the stored user.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    validate_optional_email(input.email.as_deref())?;

    let user = if input.is_empty() {
        UserRepo::find_by_id(&state.pool, &id).await?
    } else {
        UserRepo::update(&state.pool, &id, &input).await?
    };

    let user = user.ok_or_else(|| AppError::not_found("User", id))?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}
///
/// Projects, tasks and comments referencing the user are left in place.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !UserRepo::delete(&state.pool, &id).await? {
        return Err(AppError::not_found("User", id));
    }

    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(MessageResponse::deleted("User")))
}
