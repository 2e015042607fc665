use crate::domain::{comment::Comment, follow::Follow, post::Post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ======================= JWT =======================

#[derive(Debug, Deserialize)]
pub struct TokenObtainRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenVerifyRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

// ======================= POSTS =======================

/// Shared by create (POST) and full update (PUT): `text` is required, the
/// optional fields reset to null when omitted. Server-derived fields such as
/// `author` or `pub_date` are ignored if a client sends them.
#[derive(Debug, Deserialize)]
pub struct PostWriteRequest {
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub group: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostPatchRequest {
    pub text: Option<String>,
    pub image: Option<String>,
    pub group: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub author: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    pub group: Option<i64>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            author: post.author_username.clone(),
            text: post.text.clone(),
            pub_date: post.pub_date,
            image: post.image.clone(),
            group: post.group_id,
        }
    }
}

// ======================= COMMENTS =======================

#[derive(Debug, Deserialize)]
pub struct CommentWriteRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentPatchRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub author: String,
    pub text: String,
    pub created: DateTime<Utc>,
    pub post: i64,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author_username.clone(),
            text: comment.text.clone(),
            created: comment.created,
            post: comment.post_id,
        }
    }
}

// ======================= FOLLOWS =======================

#[derive(Debug, Deserialize)]
pub struct FollowCreateRequest {
    pub following: String,
}

#[derive(Debug, Deserialize)]
pub struct FollowQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub id: i64,
    pub user: String,
    pub following: String,
}

impl From<&Follow> for FollowResponse {
    fn from(follow: &Follow) -> Self {
        Self {
            id: follow.id,
            user: follow.user_username.clone(),
            following: follow.following_username.clone(),
        }
    }
}
