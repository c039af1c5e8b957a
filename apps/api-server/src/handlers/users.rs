//! User resource handlers.
//!
//! Every route requires an authenticated principal; mutations additionally
//! require the Admin role. The policy check runs before any store access.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use userhub_core::auth::{UserAction, authorize};
use userhub_core::domain::{Role, User};
use userhub_core::error::RepoError;
use userhub_core::ports::{PasswordHasher, UserFilter, UserRepository};
use userhub_shared::dto::{
    CreateUserRequest, PageQuery, PagedResult, UpdateUserRequest, UserDto, UserFilterQuery,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Default page size for unqualified listings.
const DEFAULT_PAGE_SIZE: u64 = 10;

fn to_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id,
        user_name: user.user_name.clone(),
        full_name: user.full_name.clone(),
        role: user.role.to_string(),
        email_id: user.email_id.clone(),
        mobile_num: user.mobile_num.clone(),
        profile_pic_url: user.profile_pic_url.clone(),
        created_at: user.created_at,
    }
}

fn to_filter(query: &UserFilterQuery) -> UserFilter {
    UserFilter {
        user_name: query.user_name.clone(),
        role: query.role.clone(),
        email_id: query.email_id.clone(),
        mobile_num: query.mobile_num.clone(),
    }
}

fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

fn user_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("User with id {} not found", id))
}

/// POST /api/users
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    authorize(Some(&identity.0), UserAction::Create)?;
    let req = body.into_inner();

    if req.user_name.trim().is_empty() {
        return Err(AppError::BadRequest("UserName is required.".to_string()));
    }
    if req.password.trim().is_empty() {
        return Err(AppError::BadRequest("Password is required.".to_string()));
    }

    if state.users.user_name_exists(&req.user_name, None).await? {
        return Err(AppError::Conflict(format!(
            "UserName '{}' is already taken.",
            req.user_name
        )));
    }

    // Unrecognized role strings fall back to ReadOnly at creation time.
    let role = Role::parse_or_default(&req.role);
    let password_hash = state.hasher.hash(&req.password);

    let user = User::new(
        req.user_name,
        password_hash,
        req.full_name,
        role,
        req.email_id,
        req.mobile_num,
    );
    let created = state.users.insert(user).await?;

    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("/api/users/id/{}", created.id),
        ))
        .json(to_dto(&created)))
}

/// GET /api/users/id/{id}
pub async fn get_by_id(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    authorize(Some(&identity.0), UserAction::Read)?;
    let id = path.into_inner();

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(HttpResponse::Ok().json(to_dto(&user)))
}

/// GET /api/users?skip={x}&take={y}
pub async fn list(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    authorize(Some(&identity.0), UserAction::Read)?;

    let skip = query.skip.unwrap_or(0);
    let take = query.take.unwrap_or(DEFAULT_PAGE_SIZE);

    let items = state.users.find_page(skip, take).await?;
    let total_count = state.users.count().await?;

    let dtos: Vec<UserDto> = items.iter().map(to_dto).collect();
    Ok(HttpResponse::Ok().json(PagedResult::new(dtos, total_count, skip, take)))
}

/// GET /api/users/all
pub async fn list_all(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    authorize(Some(&identity.0), UserAction::Read)?;

    let users = state.users.find_all().await?;
    let dtos: Vec<UserDto> = users.iter().map(to_dto).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

/// GET /api/users/filter?userName=&role=&emailId=&mobileNum=&skip=&take=
pub async fn filter(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<UserFilterQuery>,
) -> AppResult<HttpResponse> {
    authorize(Some(&identity.0), UserAction::Read)?;
    let query = query.into_inner();

    let filter = to_filter(&query);
    let items = state
        .users
        .find_filtered(&filter, query.skip, query.take)
        .await?;
    let total_count = state.users.count_filtered(&filter).await?;

    let skip = query.skip.unwrap_or(0);
    let take = query.take.unwrap_or(items.len() as u64);

    let dtos: Vec<UserDto> = items.iter().map(to_dto).collect();
    Ok(HttpResponse::Ok().json(PagedResult::new(dtos, total_count, skip, take)))
}

/// GET /api/users/filter/all
pub async fn filter_all(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<UserFilterQuery>,
) -> AppResult<HttpResponse> {
    authorize(Some(&identity.0), UserAction::Read)?;

    let filter = to_filter(&query);
    let users = state.users.find_filtered(&filter, None, None).await?;

    let dtos: Vec<UserDto> = users.iter().map(to_dto).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

/// PUT /api/users/id/{id}
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    authorize(Some(&identity.0), UserAction::Update)?;
    let id = path.into_inner();

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    let req = body.into_inner();
    if let Some(full_name) = non_blank(req.full_name) {
        user.full_name = full_name;
    }
    if let Some(role_input) = non_blank(req.role) {
        // Unrecognized role strings leave the role unchanged here, unlike
        // creation where they fall back to ReadOnly.
        if let Some(role) = Role::parse(&role_input) {
            user.role = role;
        }
    }
    if let Some(email_id) = non_blank(req.email_id) {
        user.email_id = email_id;
    }
    if let Some(mobile_num) = non_blank(req.mobile_num) {
        user.mobile_num = mobile_num;
    }

    let updated = state.users.update(user).await?;
    Ok(HttpResponse::Ok().json(to_dto(&updated)))
}

/// Query parameters for the upload endpoint. The stored file keeps only
/// the extension of the supplied file name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub folder: String,
    pub fieldname: String,
    pub file_name: String,
}

/// POST /api/users/id/{id}/upload
pub async fn upload(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    authorize(Some(&identity.0), UserAction::UploadProfileAsset)?;
    let id = path.into_inner();
    let query = query.into_inner();

    if body.is_empty() {
        return Err(AppError::BadRequest("File is required.".to_string()));
    }
    let folder_ok = !query.folder.is_empty()
        && query
            .folder
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !folder_ok {
        return Err(AppError::BadRequest("Invalid folder name.".to_string()));
    }

    let extension = std::path::Path::new(&query.file_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stored_name = format!("{}{}", Uuid::new_v4(), extension);

    let directory = std::path::Path::new("uploads").join(&query.folder);
    tokio::fs::create_dir_all(&directory)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    tokio::fs::write(directory.join(&stored_name), &body)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Relative URL; a static host or CDN would serve it in production.
    let url = format!("/uploads/{}/{}", query.folder, stored_name);

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    // Only the profile picture field is recognized for now.
    if query.fieldname.eq_ignore_ascii_case("profile_pic_url") {
        user.profile_pic_url = Some(url);
    }

    let updated = state.users.update(user).await?;
    Ok(HttpResponse::Ok().json(to_dto(&updated)))
}

/// DELETE /api/users/id/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    authorize(Some(&identity.0), UserAction::Delete)?;
    let id = path.into_inner();

    match state.users.delete(id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(RepoError::NotFound) => Err(user_not_found(id)),
        Err(e) => Err(e.into()),
    }
}
