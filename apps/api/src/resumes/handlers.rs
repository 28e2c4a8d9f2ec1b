//! Axum route handlers for the Resume API.
//!
//! Sub-resource edits load the stored document, apply one `Resume` edit and
//! write the whole document back. Concurrent edits to the same resume are
//! last-writer-wins.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::conventions::{check_conventions, ConventionWarning};
use crate::document::ordering::{sort_by_sort_value, sorted_resume};
use crate::document::render::render_markdown;
use crate::document::{DocumentError, SortDirection};
use crate::errors::AppError;
use crate::models::resume::{DataPoint, Resume, StoredResume};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub user_id: Uuid,
    /// "asc" or "desc". Absent means model order for a single resume.
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeBody {
    pub user_id: Uuid,
    pub resume: Resume,
}

#[derive(Debug, Deserialize)]
pub struct NameBody {
    pub user_id: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DataPointBody {
    pub user_id: Uuid,
    pub data_point: DataPoint,
}

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub user_id: Uuid,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveBody {
    pub user_id: Uuid,
    pub from_section: usize,
    pub from_index: usize,
    pub to_section: usize,
    pub to_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct MoveSectionBody {
    pub user_id: Uuid,
    pub from_index: usize,
    pub to_index: usize,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume: StoredResume,
    pub warnings: Vec<ConventionWarning>,
    /// Position of the item a create-style request just added.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl ResumeResponse {
    fn new(resume: StoredResume) -> Self {
        let warnings = check_conventions(&resume.document);
        for w in &warnings {
            warn!(
                "Resume {} section {} data point {} ('{}'): {}",
                resume.id, w.section, w.data_point, w.heading, w.message
            );
        }
        Self {
            resume,
            warnings,
            index: None,
        }
    }

    fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<StoredResume>,
    pub sort: SortDirection,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn parse_sort(raw: Option<&str>) -> Result<Option<SortDirection>, AppError> {
    raw.map(|s| s.parse::<SortDirection>().map_err(AppError::Validation))
        .transpose()
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

async fn load(state: &AppState, user_id: Uuid, id: Uuid) -> Result<StoredResume, AppError> {
    state
        .store
        .get(user_id, id)
        .await?
        .ok_or_else(|| AppError::resume_not_found(id))
}

/// Applies `edit` to the stored document and persists the result.
async fn edit_resume<T>(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    edit: impl FnOnce(&mut Resume) -> Result<T, DocumentError>,
) -> Result<(StoredResume, T), AppError> {
    let mut stored = load(state, user_id, id).await?;
    let out = edit(&mut stored.document)?;
    let updated = state
        .store
        .update(user_id, id, stored.document)
        .await?
        .ok_or_else(|| AppError::resume_not_found(id))?;
    Ok((updated, out))
}

// ────────────────────────────────────────────────────────────────────────────
// Whole-resume handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(req): Json<ResumeBody>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let stored = state.store.create(req.user_id, req.resume).await?;
    info!("Created resume {} for user {}", stored.id, stored.user_id);
    Ok((StatusCode::CREATED, Json(ResumeResponse::new(stored))))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<ViewQuery>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let sort = parse_sort(params.sort.as_deref())?.unwrap_or(state.config.default_sort);
    let mut resumes = state.store.list_for_user(params.user_id).await?;
    sort_by_sort_value(&mut resumes, |r| r.document.sort_value, sort);
    Ok(Json(ResumeListResponse { resumes, sort }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ViewQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let sort = parse_sort(params.sort.as_deref())?;
    let mut stored = load(&state, params.user_id, id).await?;
    if let Some(direction) = sort {
        stored.document = sorted_resume(&stored.document, direction);
    }
    Ok(Json(ResumeResponse::new(stored)))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_replace_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResumeBody>,
) -> Result<Json<ResumeResponse>, AppError> {
    let stored = state
        .store
        .update(req.user_id, id, req.resume)
        .await?
        .ok_or_else(|| AppError::resume_not_found(id))?;
    Ok(Json(ResumeResponse::new(stored)))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete(params.user_id, id).await? {
        return Err(AppError::resume_not_found(id));
    }
    info!("Deleted resume {id} for user {}", params.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id/markdown
pub async fn handle_render_markdown(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ViewQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sort = parse_sort(params.sort.as_deref())?;
    let stored = load(&state, params.user_id, id).await?;
    let md = match sort {
        Some(direction) => render_markdown(&sorted_resume(&stored.document, direction)),
        None => render_markdown(&stored.document),
    };
    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], md))
}

// ────────────────────────────────────────────────────────────────────────────
// Section / data point / bullet point handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/:id/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NameBody>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    require_non_empty("name", &req.name)?;
    let (stored, index) =
        edit_resume(&state, req.user_id, id, |r| Ok(r.add_section(req.name))).await?;
    Ok((
        StatusCode::CREATED,
        Json(ResumeResponse::new(stored).with_index(index)),
    ))
}

/// PATCH /api/v1/resumes/:id/sections/:section
pub async fn handle_rename_section(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, usize)>,
    Json(req): Json<NameBody>,
) -> Result<Json<ResumeResponse>, AppError> {
    require_non_empty("name", &req.name)?;
    let (stored, ()) =
        edit_resume(&state, req.user_id, id, |r| r.rename_section(section, req.name)).await?;
    Ok(Json(ResumeResponse::new(stored)))
}

/// DELETE /api/v1/resumes/:id/sections/:section
pub async fn handle_remove_section(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, usize)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let (stored, removed) =
        edit_resume(&state, params.user_id, id, |r| r.remove_section(section)).await?;
    info!("Removed section '{}' from resume {id}", removed.name);
    Ok(Json(ResumeResponse::new(stored)))
}

/// POST /api/v1/resumes/:id/move_section
pub async fn handle_move_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveSectionBody>,
) -> Result<Json<ResumeResponse>, AppError> {
    let (stored, ()) = edit_resume(&state, req.user_id, id, |r| {
        r.move_section(req.from_index, req.to_index)
    })
    .await?;
    Ok(Json(ResumeResponse::new(stored)))
}

/// POST /api/v1/resumes/:id/sections/:section/data_points
pub async fn handle_add_data_point(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, usize)>,
    Json(req): Json<DataPointBody>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let (stored, index) = edit_resume(&state, req.user_id, id, |r| {
        r.add_data_point(section, req.data_point)
    })
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ResumeResponse::new(stored).with_index(index)),
    ))
}

/// PUT /api/v1/resumes/:id/sections/:section/data_points/:data_point
pub async fn handle_replace_data_point(
    State(state): State<AppState>,
    Path((id, section, data_point)): Path<(Uuid, usize, usize)>,
    Json(req): Json<DataPointBody>,
) -> Result<Json<ResumeResponse>, AppError> {
    let (stored, _previous) = edit_resume(&state, req.user_id, id, |r| {
        r.replace_data_point(section, data_point, req.data_point)
    })
    .await?;
    Ok(Json(ResumeResponse::new(stored)))
}

/// DELETE /api/v1/resumes/:id/sections/:section/data_points/:data_point
pub async fn handle_remove_data_point(
    State(state): State<AppState>,
    Path((id, section, data_point)): Path<(Uuid, usize, usize)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let (stored, _removed) = edit_resume(&state, params.user_id, id, |r| {
        r.remove_data_point(section, data_point)
    })
    .await?;
    Ok(Json(ResumeResponse::new(stored)))
}

/// POST /api/v1/resumes/:id/sections/:section/data_points/:data_point/bullet_points
pub async fn handle_add_bullet_point(
    State(state): State<AppState>,
    Path((id, section, data_point)): Path<(Uuid, usize, usize)>,
    Json(req): Json<TextBody>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    require_non_empty("text", &req.text)?;
    let (stored, index) = edit_resume(&state, req.user_id, id, |r| {
        r.add_bullet_point(section, data_point, req.text)
    })
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ResumeResponse::new(stored).with_index(index)),
    ))
}

/// PUT /api/v1/resumes/:id/sections/:section/data_points/:data_point/bullet_points/:bullet
pub async fn handle_edit_bullet_point(
    State(state): State<AppState>,
    Path((id, section, data_point, bullet)): Path<(Uuid, usize, usize, usize)>,
    Json(req): Json<TextBody>,
) -> Result<Json<ResumeResponse>, AppError> {
    require_non_empty("text", &req.text)?;
    let (stored, ()) = edit_resume(&state, req.user_id, id, |r| {
        r.edit_bullet_point(section, data_point, bullet, req.text)
    })
    .await?;
    Ok(Json(ResumeResponse::new(stored)))
}

/// DELETE /api/v1/resumes/:id/sections/:section/data_points/:data_point/bullet_points/:bullet
pub async fn handle_remove_bullet_point(
    State(state): State<AppState>,
    Path((id, section, data_point, bullet)): Path<(Uuid, usize, usize, usize)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let (stored, _removed) = edit_resume(&state, params.user_id, id, |r| {
        r.remove_bullet_point(section, data_point, bullet)
    })
    .await?;
    Ok(Json(ResumeResponse::new(stored)))
}

/// POST /api/v1/resumes/:id/move
pub async fn handle_move_data_point(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveBody>,
) -> Result<Json<ResumeResponse>, AppError> {
    let (stored, ()) = edit_resume(&state, req.user_id, id, |r| {
        r.move_data_point(req.from_section, req.from_index, req.to_section, req.to_index)
    })
    .await?;
    Ok(Json(ResumeResponse::new(stored)))
}

/// POST /api/v1/resumes/:id/extra_infos
pub async fn handle_add_extra_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TextBody>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    require_non_empty("text", &req.text)?;
    let (stored, index) =
        edit_resume(&state, req.user_id, id, |r| Ok(r.add_extra_info(req.text))).await?;
    Ok((
        StatusCode::CREATED,
        Json(ResumeResponse::new(stored).with_index(index)),
    ))
}

/// DELETE /api/v1/resumes/:id/extra_infos/:index
pub async fn handle_remove_extra_info(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let (stored, _removed) =
        edit_resume(&state, params.user_id, id, |r| r.remove_extra_info(index)).await?;
    Ok(Json(ResumeResponse::new(stored)))
}
