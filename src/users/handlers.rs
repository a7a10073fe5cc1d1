use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::TokenKeys,
    error::AppError,
    state::AppState,
    users::{
        dto::{
            LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse,
            UsersResponse,
        },
        password::{hash_password, verify_password},
        repo::{PublicUser, User},
    },
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

pub fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/email/:email", get(get_user_by_email))
        .route("/users/:id", get(get_user_by_id))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.validate()?;

    // Pre-check for a friendlier message; the unique constraint remains the
    // arbiter when two registrations race.
    if User::email_exists(&state.db, &payload.email).await? {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Duplicate("Email already exists"));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.email, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created",
            email: user.email,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.validate()?;

    let Some(user) = User::find_by_email(&state.db, &payload.email).await? else {
        warn!(email = %payload.email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let keys = TokenKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful.",
        token,
    }))
}

#[instrument(skip(state))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(Json(UserResponse { user }))
}

#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(Json(UserResponse {
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UsersResponse>, AppError> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(UsersResponse { users }))
}
