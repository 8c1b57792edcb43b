//! Lot API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateLotRequest, EditIndoorLotRequest, LotDto, LotStatusDto, ReservationReportDto,
    SpaceSummaryDto, UpdateReservedRequest,
};
use crate::application::{LotService, NewLot};
use crate::domain::LocationType;
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse, ValidatedJson};

/// State shared by the lot and boundary handlers
#[derive(Clone)]
pub struct LotState {
    pub service: Arc<LotService>,
}

#[utoipa::path(
    get,
    path = "/get-all-lots",
    tag = "Lots",
    responses(
        (status = 200, description = "All lots", body = Vec<LotDto>)
    )
)]
pub async fn list_lots(State(state): State<LotState>) -> Result<Json<Vec<LotDto>>, ApiError<()>> {
    let lots = state.service.list().await.map_err(error_response)?;
    Ok(Json(lots.into_iter().map(LotDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/get-lots-by-location/{locationID}",
    tag = "Lots",
    params(("locationID" = String, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Lots of the location", body = Vec<LotDto>)
    )
)]
pub async fn lots_by_location(
    State(state): State<LotState>,
    Path(location_id): Path<String>,
) -> Result<Json<Vec<LotDto>>, ApiError<()>> {
    let lots = state
        .service
        .list_by_location(&location_id)
        .await
        .map_err(error_response)?;
    Ok(Json(lots.into_iter().map(LotDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/get-lot/{lotID}",
    tag = "Lots",
    params(("lotID" = String, Path, description = "Lot ID")),
    responses(
        (status = 200, description = "Lot", body = LotDto),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_lot(
    State(state): State<LotState>,
    Path(lot_id): Path<String>,
) -> Result<Json<LotDto>, ApiError<()>> {
    match state.service.get(&lot_id).await {
        Ok(lot) => Ok(Json(lot.into())),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/add-lot",
    tag = "Lots",
    request_body = CreateLotRequest,
    responses(
        (status = 201, description = "Lot created", body = ApiResponse<LotDto>),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Location does not exist"),
        (status = 409, description = "Lot ID already exists")
    )
)]
pub async fn add_lot(
    State(state): State<LotState>,
    ValidatedJson(body): ValidatedJson<CreateLotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LotDto>>), ApiError<LotDto>> {
    let location_type: LocationType = body.location_type.parse().map_err(error_response)?;
    let center = body
        .coordinates
        .as_ref()
        .map(|c| c.to_coordinate())
        .transpose()
        .map_err(error_response)?;

    let lot = state
        .service
        .create(NewLot {
            lot_id: body.lot_id,
            name: body.lot_name,
            location_id: body.location_id,
            location_type,
            center,
        })
        .await
        .map_err(error_response)?;

    let message = format!("Parking lot {} created successfully!", lot.lot_id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(lot.into(), message)),
    ))
}

#[utoipa::path(
    post,
    path = "/edit-indoor-lot",
    tag = "Lots",
    request_body = EditIndoorLotRequest,
    responses(
        (status = 200, description = "Indoor lot updated", body = ApiResponse<LotDto>),
        (status = 400, description = "Missing or invalid data"),
        (status = 404, description = "Lot not found")
    )
)]
pub async fn edit_indoor_lot(
    State(state): State<LotState>,
    ValidatedJson(body): ValidatedJson<EditIndoorLotRequest>,
) -> Result<Json<ApiResponse<LotDto>>, ApiError<LotDto>> {
    let center = body.coordinates.to_coordinate().map_err(error_response)?;
    state
        .service
        .edit_indoor(&body.lot_id, &body.lot_name, center)
        .await
        .map_err(error_response)?;

    let lot = state.service.get(&body.lot_id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::with_message(
        lot.into(),
        "Indoor lot updated successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/check-lot/{lotID}",
    tag = "Lots",
    params(("lotID" = String, Path, description = "Lot ID")),
    responses(
        (status = 200, description = "Existence and boundary state", body = LotStatusDto)
    )
)]
pub async fn check_lot(
    State(state): State<LotState>,
    Path(lot_id): Path<String>,
) -> Result<Json<LotStatusDto>, ApiError<()>> {
    let status = state.service.check(&lot_id).await.map_err(error_response)?;
    Ok(Json(status.into()))
}

#[utoipa::path(
    get,
    path = "/check-lot-spaces/{lotID}",
    tag = "Lots",
    params(("lotID" = String, Path, description = "Lot ID")),
    responses(
        (status = 200, description = "Space counter", body = SpaceSummaryDto),
        (status = 404, description = "Lot not found")
    )
)]
pub async fn check_lot_spaces(
    State(state): State<LotState>,
    Path(lot_id): Path<String>,
) -> Result<Json<SpaceSummaryDto>, ApiError<()>> {
    let summary = state
        .service
        .space_summary(&lot_id)
        .await
        .map_err(error_response)?;
    Ok(Json(summary.into()))
}

/// Reserve or release every space in the lot.
///
/// Answers 207 when some spaces could not be updated; the report names
/// them and the lot flag is left as it was.
#[utoipa::path(
    put,
    path = "/update-lot-reserved/{lotID}",
    tag = "Lots",
    params(("lotID" = String, Path, description = "Lot ID")),
    request_body = UpdateReservedRequest,
    responses(
        (status = 200, description = "Every space updated", body = ApiResponse<ReservationReportDto>),
        (status = 207, description = "Some spaces failed", body = ApiResponse<ReservationReportDto>),
        (status = 404, description = "Lot not found")
    )
)]
pub async fn update_lot_reserved(
    State(state): State<LotState>,
    Path(lot_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateReservedRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationReportDto>>), ApiError<ReservationReportDto>>
{
    let report = state
        .service
        .set_reservation(&lot_id, body.is_reserved)
        .await
        .map_err(error_response)?;

    if report.is_complete() {
        let message = if body.is_reserved {
            format!("Lot {} reserved", lot_id)
        } else {
            format!("Lot {} released", lot_id)
        };
        return Ok((
            StatusCode::OK,
            Json(ApiResponse::with_message(report.into(), message)),
        ));
    }

    let failed = report.failures.len();
    Ok((
        StatusCode::MULTI_STATUS,
        Json(ApiResponse {
            success: false,
            data: Some(report.into()),
            message: None,
            error: Some(format!(
                "{} space(s) could not be updated; lot flag unchanged",
                failed
            )),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/delete-lot/{lotID}",
    tag = "Lots",
    params(("lotID" = String, Path, description = "Lot ID")),
    responses(
        (status = 200, description = "Lot, boundary and spaces deleted"),
        (status = 404, description = "Lot not found")
    )
)]
pub async fn delete_lot(
    State(state): State<LotState>,
    Path(lot_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError<()>> {
    state.service.delete(&lot_id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::with_message(
        (),
        format!("Parking lot {} and all associated data deleted", lot_id),
    )))
}
