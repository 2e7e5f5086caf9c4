//! REST handlers for managing members.

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use roster_core::Member;
use tracing::debug;

use crate::{
    alerts,
    app_state::AppState,
    errors::{AppError, AppResult},
    pagination,
};

const ENTITY_NAME: &str = "member";

/// POST /api/members : create a new member.
pub async fn create_member(
    State(state): State<AppState>,
    Json(member): Json<Member>,
) -> AppResult<Response> {
    debug!("REST request to save member: {member:?}");
    if member.id.is_some() {
        return Err(AppError::bad_request("a new member cannot already have an id")
            .with_alert(alerts::failure_key(ENTITY_NAME, "idexists"), ENTITY_NAME));
    }
    do_create(state, member).await
}

/// PUT /api/members : update an existing member, or create one when the
/// body carries no id.
pub async fn update_member(
    State(state): State<AppState>,
    Json(member): Json<Member>,
) -> AppResult<Response> {
    debug!("REST request to update member: {member:?}");
    let Some(id) = member.id else {
        return do_create(state, member).await;
    };

    let result = state.service.save(member).await?;
    let mut response = (StatusCode::OK, Json(&result)).into_response();
    response
        .headers_mut()
        .extend(alerts::entity_update_alert(ENTITY_NAME, id)?);
    Ok(response)
}

async fn do_create(state: AppState, member: Member) -> AppResult<Response> {
    let result = state.service.save(member).await?;
    let id = result
        .id
        .ok_or_else(|| AppError::internal("store returned a member without an id"))?;

    let mut response = (StatusCode::CREATED, Json(&result)).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&format!("/api/members/{id}"))?,
    );
    headers.extend(alerts::entity_creation_alert(ENTITY_NAME, id)?);
    Ok(response)
}

/// GET /api/members : get a page of members.
pub async fn get_all_members(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    debug!("REST request to get a page of members");
    let request = pagination::parse_page_request(query.as_deref())?;
    let page = state.service.find_all(&request).await?;

    let mut response = (StatusCode::OK, Json(&page.content)).into_response();
    response
        .headers_mut()
        .extend(pagination::pagination_headers("/api/members", &page)?);
    Ok(response)
}

/// GET /api/members/{id} : get one member.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    debug!("REST request to get member: {id}");
    match state.service.find_one(id).await? {
        Some(member) => Ok((StatusCode::OK, Json(member)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// DELETE /api/members/{id} : delete a member. Idempotent.
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    debug!("REST request to delete member: {id}");
    state.service.delete(id).await?;

    let mut response = StatusCode::OK.into_response();
    response
        .headers_mut()
        .extend(alerts::entity_deletion_alert(ENTITY_NAME, id)?);
    Ok(response)
}

/// GET /_search/members/{query} : free-text search over the index.
pub async fn search_members(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<Json<Vec<Member>>> {
    debug!("REST request to search members for query {query}");
    let members = state.service.search(&query).await?;
    Ok(Json(members))
}
