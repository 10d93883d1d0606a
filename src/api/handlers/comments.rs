use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use super::parse_id;
use crate::api::errors::{ApiError, ApiResult};
use crate::api::middleware::{AuthUser, ValidatedJson};
use crate::api::state::AppState;
use crate::api::views::{users_by_id, UserSummary};
use crate::domain::comment::Comment;
use crate::domain::user::User;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CommentRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub post: Uuid,
    pub author: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(comment: Comment, author: Option<&User>) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            post: comment.post,
            author: author.map(UserSummary::public),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Loads a comment the requester is allowed to change
async fn authored_comment(state: &AppState, auth: &AuthUser, id: &str, action: &str) -> ApiResult<Comment> {
    let id = parse_id(id, "Comment")?;
    let comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    if !comment.is_authored_by(auth.id()) {
        return Err(ApiError::forbidden(format!(
            "Not authorized to {} this comment",
            action
        )));
    }

    Ok(comment)
}

/// POST /api/comments/:postId
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let post_id = parse_id(&post_id, "Post")?;
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let comment = Comment::new(req.text.unwrap_or_default(), post_id, auth.id())
        .map_err(ApiError::bad_request)?;
    state.comments.create(&comment).await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse::new(comment, Some(&auth.user))),
    ))
}

/// Comments on a post, newest first
///
/// GET /api/comments/:postId
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let post_id = parse_id(&post_id, "Post")?;
    let comments = state.comments.find_by_post(post_id).await?;
    let authors = users_by_id(&state, comments.iter().map(|c| c.author)).await?;

    Ok(Json(
        comments
            .into_iter()
            .map(|comment| {
                let author = authors.get(&comment.author);
                CommentResponse::new(comment, author)
            })
            .collect(),
    ))
}

/// Edit a comment; blank text leaves it unchanged
///
/// PUT /api/comments/:commentId
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let mut comment = authored_comment(&state, &auth, &id, "update").await?;

    comment.edit(req.text);
    state.comments.update(&comment).await?;

    Ok(Json(CommentResponse::new(comment, Some(&auth.user))))
}

/// DELETE /api/comments/:commentId
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let comment = authored_comment(&state, &auth, &id, "delete").await?;
    state.comments.delete(comment.id).await?;

    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}
