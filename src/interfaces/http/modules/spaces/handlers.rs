//! Space API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateSpaceRequest, EditSpaceRequest, FeatureFlagsDto, NextSpaceNumberDto, SpaceDto,
    SpacesQuery, UpdateSpaceRequest,
};
use crate::application::SpaceService;
use crate::domain::ParkingType;
use crate::interfaces::http::common::{
    bad_request, error_response, ApiError, ApiResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct SpaceState {
    pub service: Arc<SpaceService>,
}

#[utoipa::path(
    post,
    path = "/add-space",
    tag = "Spaces",
    request_body = CreateSpaceRequest,
    responses(
        (status = 201, description = "Space created", body = ApiResponse<SpaceDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Lot not found"),
        (status = 409, description = "Space ID already exists")
    )
)]
pub async fn add_space(
    State(state): State<SpaceState>,
    ValidatedJson(body): ValidatedJson<CreateSpaceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SpaceDto>>), ApiError<SpaceDto>> {
    let new = body.into_new_space().map_err(error_response)?;
    let space = state.service.create(new).await.map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            space.into(),
            "Parking space added successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/get-spaces",
    tag = "Spaces",
    params(SpacesQuery),
    responses(
        (status = 200, description = "Spaces of the lot by sequence number", body = Vec<SpaceDto>),
        (status = 400, description = "lotID missing")
    )
)]
pub async fn get_spaces(
    State(state): State<SpaceState>,
    Query(query): Query<SpacesQuery>,
) -> Result<Json<Vec<SpaceDto>>, ApiError<()>> {
    let Some(lot_id) = query.lot_id.filter(|id| !id.trim().is_empty()) else {
        return Err(bad_request("lotID is required"));
    };
    let spaces = state
        .service
        .list_for_lot(&lot_id)
        .await
        .map_err(error_response)?;
    Ok(Json(spaces.into_iter().map(SpaceDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/get-parking-space/{id}",
    tag = "Spaces",
    params(("id" = String, Path, description = "Parking space ID")),
    responses(
        (status = 200, description = "Space", body = SpaceDto),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_parking_space(
    State(state): State<SpaceState>,
    Path(space_id): Path<String>,
) -> Result<Json<SpaceDto>, ApiError<()>> {
    match state.service.get(&space_id).await {
        Ok(space) => Ok(Json(space.into())),
        Err(e) => Err(error_response(e)),
    }
}

/// Partial update. Switching to `Regular` remembers the current type in
/// `originalType` unless one is already remembered.
#[utoipa::path(
    put,
    path = "/update-space/{id}",
    tag = "Spaces",
    params(("id" = String, Path, description = "Parking space ID")),
    request_body = UpdateSpaceRequest,
    responses(
        (status = 200, description = "Space updated", body = ApiResponse<SpaceDto>),
        (status = 400, description = "Nothing to update or invalid value"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_space(
    State(state): State<SpaceState>,
    Path(space_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateSpaceRequest>,
) -> Result<Json<ApiResponse<SpaceDto>>, ApiError<SpaceDto>> {
    let patch = body.into_patch().map_err(error_response)?;
    let space = state
        .service
        .update(&space_id, patch)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::with_message(
        space.into(),
        "Parking space updated successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/edit-parking-space",
    tag = "Spaces",
    request_body = EditSpaceRequest,
    responses(
        (status = 200, description = "Space updated", body = ApiResponse<SpaceDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn edit_parking_space(
    State(state): State<SpaceState>,
    ValidatedJson(body): ValidatedJson<EditSpaceRequest>,
) -> Result<Json<ApiResponse<SpaceDto>>, ApiError<SpaceDto>> {
    let edit = body.to_edit().map_err(error_response)?;
    let space = state
        .service
        .edit(&body.space_id, edit)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::with_message(
        space.into(),
        "Parking space updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/delete-space/{id}",
    tag = "Spaces",
    params(("id" = String, Path, description = "Parking space ID")),
    responses(
        (status = 200, description = "Space deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_space(
    State(state): State<SpaceState>,
    Path(space_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError<()>> {
    state
        .service
        .delete(&space_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::with_message(
        (),
        "Parking space deleted successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/get-next-space-number/{lotID}",
    tag = "Spaces",
    params(("lotID" = String, Path, description = "Lot ID")),
    responses(
        (status = 200, description = "Next free sequence number and ID", body = NextSpaceNumberDto),
        (status = 400, description = "Sequence numbers exhausted")
    )
)]
pub async fn next_space_number(
    State(state): State<SpaceState>,
    Path(lot_id): Path<String>,
) -> Result<Json<NextSpaceNumberDto>, ApiError<()>> {
    let next = state.service.next_id(&lot_id).await.map_err(error_response)?;
    Ok(Json(next.into()))
}

#[utoipa::path(
    get,
    path = "/feature-preset/{parkingType}",
    tag = "Spaces",
    params(("parkingType" = String, Path, description = "Parking type, e.g. EV")),
    responses(
        (status = 200, description = "Flags pre-selected for the type", body = FeatureFlagsDto)
    )
)]
pub async fn feature_preset(Path(parking_type): Path<String>) -> Json<FeatureFlagsDto> {
    let flags = SpaceService::feature_preset(&ParkingType::from(parking_type.as_str()));
    Json(flags.into())
}
