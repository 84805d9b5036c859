use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use relaya_auth_types::identity::Identity;
use relaya_domain::content::PostContent;
use relaya_domain::outcome::PublishOutcome;
use relaya_domain::platform::Platform;

use crate::domain::types::{Post, ScheduleType};
use crate::error::CampaignServiceError;
use crate::state::AppState;
use crate::usecase::post::{CreatePostInput, CreatePostUseCase, GetPostUseCase, ListPostsUseCase};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub platform: Platform,
    pub content: PostContent,
    pub schedule_type: ScheduleType,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub platform: Platform,
    pub status: String,
    pub schedule_type: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub external_id: Option<String>,
    #[serde(serialize_with = "relaya_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            platform: post.platform,
            status: post.status.as_str().to_owned(),
            schedule_type: post.schedule_type.as_str().to_owned(),
            scheduled_at: post.scheduled_at,
            external_id: post.external_id,
            created_at: post.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct CreatePostResponse {
    pub post: PostResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<PublishOutcome>,
}

// ── POST /posts ──────────────────────────────────────────────────────────────

pub async fn create_post(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, CampaignServiceError> {
    let usecase = CreatePostUseCase {
        posts: state.post_repo(),
        credentials: state.credential_repo(),
        publisher: state.publisher(body.platform),
    };

    let out = usecase
        .execute(CreatePostInput {
            client_id: identity.client_id,
            created_by: identity.user_id,
            platform: body.platform,
            content: body.content,
            schedule_type: body.schedule_type,
            scheduled_at: body.scheduled_at,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            post: out.post.into(),
            publish: out.outcome,
        }),
    ))
}

// ── GET /posts ───────────────────────────────────────────────────────────────

pub async fn list_posts(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, CampaignServiceError> {
    let usecase = ListPostsUseCase {
        posts: state.post_repo(),
    };
    let posts = usecase.execute(identity.client_id).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

// ── GET /posts/{id} ──────────────────────────────────────────────────────────

pub async fn get_post(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, CampaignServiceError> {
    let usecase = GetPostUseCase {
        posts: state.post_repo(),
    };
    let post = usecase.execute(id, identity.client_id).await?;
    Ok(Json(post.into()))
}
