//! Boundary API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{BoundaryRequest, BoundarySavedDto};
use crate::domain::boundary::WriteMode;
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::lots::LotState;

async fn save(
    state: &LotState,
    body: BoundaryRequest,
    mode: WriteMode,
) -> Result<BoundarySavedDto, ApiError<BoundarySavedDto>> {
    if body.center_coordinates.is_some() {
        tracing::debug!(lot_id = %body.lot_id, "Ignoring client-supplied centerCoordinates");
    }
    let vertices = body.vertices().map_err(error_response)?;
    let vertex_count = vertices.len();

    let center = state
        .service
        .save_boundary(&body.lot_id, vertices, mode, body.lot_name)
        .await
        .map_err(error_response)?;

    Ok(BoundarySavedDto {
        lot_id: body.lot_id,
        center: center.as_pair(),
        vertex_count,
    })
}

#[utoipa::path(
    post,
    path = "/add-lot-boundary",
    tag = "Boundaries",
    request_body = BoundaryRequest,
    responses(
        (status = 201, description = "Boundary saved", body = ApiResponse<BoundarySavedDto>),
        (status = 400, description = "Missing data or degenerate polygon"),
        (status = 404, description = "Lot not found"),
        (status = 409, description = "Lot already has a boundary")
    )
)]
pub async fn add_lot_boundary(
    State(state): State<LotState>,
    ValidatedJson(body): ValidatedJson<BoundaryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BoundarySavedDto>>), ApiError<BoundarySavedDto>> {
    let saved = save(&state, body, WriteMode::Create).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(saved, "Lot boundary saved successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/edit-lot-boundary",
    tag = "Boundaries",
    request_body = BoundaryRequest,
    responses(
        (status = 200, description = "Boundary replaced", body = ApiResponse<BoundarySavedDto>),
        (status = 400, description = "Missing data or degenerate polygon"),
        (status = 404, description = "Lot not found")
    )
)]
pub async fn edit_lot_boundary(
    State(state): State<LotState>,
    ValidatedJson(body): ValidatedJson<BoundaryRequest>,
) -> Result<Json<ApiResponse<BoundarySavedDto>>, ApiError<BoundarySavedDto>> {
    let saved = save(&state, body, WriteMode::Replace).await?;
    Ok(Json(ApiResponse::with_message(
        saved,
        "Lot boundary updated successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/get-lot-boundary/{lotID}",
    tag = "Boundaries",
    params(("lotID" = String, Path, description = "Lot ID")),
    responses(
        (status = 200, description = "Bare `[[lat, lng], ...]` in point order, empty if none", body = Vec<Vec<f64>>)
    )
)]
pub async fn get_lot_boundary(
    State(state): State<LotState>,
    Path(lot_id): Path<String>,
) -> Result<Json<Vec<[f64; 2]>>, ApiError<()>> {
    let vertices = state
        .service
        .boundary(&lot_id)
        .await
        .map_err(error_response)?;
    Ok(Json(vertices.iter().map(|v| v.as_pair()).collect()))
}
