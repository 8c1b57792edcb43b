//! Location API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{LocationDeleted, LocationDto, LocationRequest};
use crate::application::LocationService;
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct LocationState {
    pub service: Arc<LocationService>,
}

#[utoipa::path(
    get,
    path = "/get-all-locations",
    tag = "Locations",
    responses(
        (status = 200, description = "All locations", body = Vec<LocationDto>)
    )
)]
pub async fn list_locations(
    State(state): State<LocationState>,
) -> Result<Json<Vec<LocationDto>>, ApiError<()>> {
    let locations = state.service.list().await.map_err(error_response)?;
    Ok(Json(locations.into_iter().map(LocationDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/get-location/{locationID}",
    tag = "Locations",
    params(("locationID" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location", body = LocationDto),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_location(
    State(state): State<LocationState>,
    Path(location_id): Path<String>,
) -> Result<Json<LocationDto>, ApiError<()>> {
    match state.service.get(&location_id).await {
        Ok(location) => Ok(Json(location.into())),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/add-location",
    tag = "Locations",
    request_body = LocationRequest,
    responses(
        (status = 201, description = "Location created", body = ApiResponse<LocationDto>),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Location ID already exists")
    )
)]
pub async fn add_location(
    State(state): State<LocationState>,
    ValidatedJson(body): ValidatedJson<LocationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LocationDto>>), ApiError<LocationDto>> {
    let location = state
        .service
        .create(body.into())
        .await
        .map_err(error_response)?;
    let message = format!("Location {} added successfully", location.location_id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(location.into(), message)),
    ))
}

#[utoipa::path(
    put,
    path = "/update-location",
    tag = "Locations",
    request_body = LocationRequest,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_location(
    State(state): State<LocationState>,
    ValidatedJson(body): ValidatedJson<LocationRequest>,
) -> Result<Json<ApiResponse<LocationDto>>, ApiError<LocationDto>> {
    let location = state
        .service
        .update(body.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::with_message(
        location.into(),
        "Location updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/delete-location/{locationID}",
    tag = "Locations",
    params(("locationID" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location and its lots deleted", body = ApiResponse<LocationDeleted>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_location(
    State(state): State<LocationState>,
    Path(location_id): Path<String>,
) -> Result<Json<ApiResponse<LocationDeleted>>, ApiError<LocationDeleted>> {
    let lots_deleted = state
        .service
        .delete(&location_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::with_message(
        LocationDeleted {
            location_id,
            lots_deleted,
        },
        "Location deleted successfully",
    )))
}
