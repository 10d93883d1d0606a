use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{applications, auth, comments, companies, health, jobs, posts};
use crate::api::state::AppState;

/// Builds the full HTTP surface
///
/// Sibling routes share one parameter name per position (`:id`), which
/// the router requires.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::welcome))
        .route("/health", get(health::health_check))
        // Auth routes
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/auth/profile",
            get(auth::get_profile).put(auth::update_profile),
        )
        // Job routes
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/count", get(jobs::count_jobs))
        .route("/api/jobs/:id", get(jobs::get_job))
        // Application routes
        .route("/api/applications", get(applications::list_mine))
        .route(
            "/api/applications/employer/applicants",
            get(applications::list_for_employer),
        )
        .route("/api/applications/job/:id", get(applications::list_for_job))
        .route("/api/applications/:id", post(applications::apply))
        .route(
            "/api/applications/:id/status",
            put(applications::update_status),
        )
        // Company routes
        .route(
            "/api/companies",
            get(companies::list_companies).post(companies::register_company),
        )
        .route("/api/companies/:id", get(companies::get_company))
        // Post routes
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/like/:id", put(posts::toggle_like))
        .route(
            "/api/posts/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        // Comment routes: `:id` is the post for GET/POST, the comment for PUT/DELETE
        .route(
            "/api/comments/:id",
            get(comments::list_comments)
                .post(comments::add_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
