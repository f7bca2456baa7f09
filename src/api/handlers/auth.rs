use crate::{
    types::{AppError, MessageResponse, Result, SignInForm, SignUpRequest, TokenResponse},
    AppState,
};
use axum::{extract::State, Form, Json};

/// Register a new user
#[utoipa::path(
    post,
    path = "/user/signup",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "User already exists")
    ),
    tag = "user"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<Json<MessageResponse>> {
    payload.validate()?;
    let email = payload.email.trim();

    // Check if user exists
    if state.turso.get_user_by_email(email).await?.is_some() {
        return Err(AppError::Conflict(
            "User with supplied email exists".to_string(),
        ));
    }

    // Hash on the blocking pool
    let hasher = state.password_hasher.clone();
    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

    state.turso.create_user(email, &password_hash).await?;

    tracing::info!(email = %email, "user registered");
    Ok(Json(MessageResponse::new("User successfully registered!")))
}

/// Sign in with email and password (form-encoded, OAuth2 password flow)
#[utoipa::path(
    post,
    path = "/user/signin",
    request_body(content = SignInForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Sign-in successful", body = TokenResponse),
        (status = 403, description = "Wrong credential passed"),
        (status = 404, description = "User does not exist")
    ),
    tag = "user"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Form(form): Form<SignInForm>,
) -> Result<Json<TokenResponse>> {
    let user = state
        .turso
        .get_user_by_email(form.username.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    let hasher = state.password_hasher.clone();
    let password = form.password;
    let digest = user.password_hash;
    let is_valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))??;

    if !is_valid {
        tracing::warn!(email = %user.email, "sign-in with wrong password");
        return Err(AppError::WrongCredentials);
    }

    let access_token = state
        .token_codec
        .issue(&user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::debug!(email = %user.email, "token issued");
    Ok(Json(TokenResponse::bearer(access_token)))
}
