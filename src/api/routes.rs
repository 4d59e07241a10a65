//! API route configuration.
//!
//! Authentication is enforced per handler through the extractors in
//! [`crate::api::middleware::auth`], so open, user and admin endpoints can
//! share a path (for example `GET /users` vs `GET /users/get-all`).

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::api::handlers::{
    delete_url_handler, forgot_password_handler, get_me_handler, get_user_handler,
    health_handler, list_all_urls_handler, list_my_urls_handler, list_user_urls_handler,
    list_users_handler, lock_user_handler, login_handler, ping_handler, register_handler,
    reset_password_handler, shorten_handler, unlock_user_handler, update_me_handler,
    update_user_handler,
};
use crate::state::AppState;

/// All routes mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `GET|POST /health`                     - Health check / ping echo
/// - `POST  /users`                         - Register
/// - `GET|PATCH /users`                     - Own account (user)
/// - `POST  /users/login`                   - Login
/// - `POST  /users/forgot-password`         - Forgot-password request
/// - `PATCH /users/reset-password`          - Reset own password (user)
/// - `GET   /users/get-all`                 - All accounts (admin)
/// - `GET|PATCH /users/{idOrEmail}`         - Any account (admin)
/// - `PATCH /users/lock/{idOrEmail}`        - Lock account (admin)
/// - `PATCH /users/unlock/{idOrEmail}`      - Unlock account (admin)
/// - `POST  /url/shorten`                   - Shorten (token optional)
/// - `GET   /url`                           - Own links (user)
/// - `GET   /url/get-all`                   - All links (admin)
/// - `GET|DELETE /url/{id}`                 - Links of a user (admin) / delete a link (owner or admin)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler).post(ping_handler))
        .merge(user_routes())
        .merge(url_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            post(register_handler)
                .get(get_me_handler)
                .patch(update_me_handler),
        )
        .route("/users/login", post(login_handler))
        .route("/users/forgot-password", post(forgot_password_handler))
        .route("/users/reset-password", patch(reset_password_handler))
        .route("/users/get-all", get(list_users_handler))
        .route(
            "/users/{id_or_email}",
            get(get_user_handler).patch(update_user_handler),
        )
        .route("/users/lock/{id_or_email}", patch(lock_user_handler))
        .route("/users/unlock/{id_or_email}", patch(unlock_user_handler))
}

fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/url", get(list_my_urls_handler))
        .route("/url/shorten", post(shorten_handler))
        .route("/url/get-all", get(list_all_urls_handler))
        .route(
            "/url/{id}",
            get(list_user_urls_handler).delete(delete_url_handler),
        )
}
