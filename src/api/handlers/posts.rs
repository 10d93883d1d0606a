use std::collections::HashMap;

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

use super::comments::CommentResponse;
use super::parse_id;
use crate::api::errors::{ApiError, ApiResult};
use crate::api::middleware::{AuthUser, ValidatedJson};
use crate::api::state::AppState;
use crate::api::views::{users_by_id, UserSummary};
use crate::domain::post::Post;
use crate::domain::user::User;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: String,
    pub image: Option<String>,
}

/// Partial edit; absent fields keep their value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub content: String,
    pub image: String,
    pub author: Option<UserSummary>,
    pub likes: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentResponse>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    fn new(post: Post, author: Option<&User>) -> Self {
        Self {
            id: post.id,
            content: post.content,
            image: post.image,
            author: author.map(UserSummary::public),
            likes: post.likes,
            comment_count: None,
            comments: None,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

async fn find_post(state: &AppState, id: &str) -> ApiResult<Post> {
    let id = parse_id(id, "Post")?;
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))
}

/// Share a post on the community feed
///
/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<PostResponse>)> {
    let post = Post::new(req.content, req.image, auth.id()).map_err(ApiError::bad_request)?;
    state.posts.create(&post).await?;

    let mut response = PostResponse::new(post, Some(&auth.user));
    response.comment_count = Some(0);

    Ok((StatusCode::CREATED, Json(response)))
}

/// The feed, newest first, with comment counts
///
/// GET /api/posts
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<PostResponse>>> {
    let posts = state.posts.find_all().await?;
    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

    let authors = users_by_id(&state, posts.iter().map(|p| p.author)).await?;
    let counts: HashMap<Uuid, u64> = state.comments.count_by_posts(&post_ids).await?;

    Ok(Json(
        posts
            .into_iter()
            .map(|post| {
                let count = counts.get(&post.id).copied().unwrap_or(0);
                let author = authors.get(&post.author);
                let mut response = PostResponse::new(post, author);
                response.comment_count = Some(count);
                response
            })
            .collect(),
    ))
}

/// A post with its comment thread
///
/// GET /api/posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post = find_post(&state, &id).await?;
    let comments = state.comments.find_by_post(post.id).await?;

    let people = users_by_id(
        &state,
        std::iter::once(post.author).chain(comments.iter().map(|c| c.author)),
    )
    .await?;

    let comments: Vec<CommentResponse> = comments
        .into_iter()
        .map(|comment| {
            let author = people.get(&comment.author);
            CommentResponse::new(comment, author)
        })
        .collect();

    let author = people.get(&post.author);
    let mut response = PostResponse::new(post, author);
    response.comment_count = Some(comments.len() as u64);
    response.comments = Some(comments);

    Ok(Json(response))
}

/// Like the post, or take the like back
///
/// PUT /api/posts/like/:id
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Uuid>>> {
    let post = find_post(&state, &id).await?;
    let likes = state.posts.toggle_like(post.id, auth.id()).await?;

    Ok(Json(likes))
}

/// Edit a post; author only
///
/// PUT /api/posts/:id
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let mut post = find_post(&state, &id).await?;

    if !post.is_authored_by(auth.id()) {
        return Err(ApiError::forbidden("Not authorized to update this post"));
    }

    post.edit(req.content, req.image).map_err(ApiError::bad_request)?;
    state.posts.update(&post).await?;

    Ok(Json(PostResponse::new(post, Some(&auth.user))))
}

/// Delete a post together with its comments and likes; author only
///
/// DELETE /api/posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let post = find_post(&state, &id).await?;

    if !post.is_authored_by(auth.id()) {
        return Err(ApiError::forbidden("Not authorized to delete this post"));
    }

    // Post first, so a comment created mid-delete finds no parent
    state.posts.delete(post.id).await?;
    let removed = state.comments.delete_by_post(post.id).await?;
    tracing::info!(post_id = %post.id, comments_removed = removed, "post deleted");

    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
