//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{LocationService, LotService, SpaceService};
use crate::domain::RepositoryProvider;

use super::common::ApiResponse;
use super::modules::{
    boundaries, health, locations, lots,
    metrics::{self, http_metrics_middleware, MetricsState},
    spaces,
};

/// State for every parking route. Handlers extract their own slice via `FromRef`.
#[derive(Clone)]
pub struct ParkingState {
    pub location_service: Arc<LocationService>,
    pub lot_service: Arc<LotService>,
    pub space_service: Arc<SpaceService>,
}

impl ParkingState {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            location_service: Arc::new(LocationService::new(repos.clone())),
            lot_service: Arc::new(LotService::new(repos.clone())),
            space_service: Arc::new(SpaceService::new(repos)),
        }
    }
}

impl FromRef<ParkingState> for locations::LocationState {
    fn from_ref(s: &ParkingState) -> Self {
        locations::LocationState {
            service: Arc::clone(&s.location_service),
        }
    }
}

impl FromRef<ParkingState> for lots::LotState {
    fn from_ref(s: &ParkingState) -> Self {
        lots::LotState {
            service: Arc::clone(&s.lot_service),
        }
    }
}

impl FromRef<ParkingState> for spaces::SpaceState {
    fn from_ref(s: &ParkingState) -> Self {
        spaces::SpaceState {
            service: Arc::clone(&s.space_service),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Locations
        locations::list_locations,
        locations::get_location,
        locations::add_location,
        locations::update_location,
        locations::delete_location,
        // Lots
        lots::list_lots,
        lots::lots_by_location,
        lots::get_lot,
        lots::add_lot,
        lots::edit_indoor_lot,
        lots::check_lot,
        lots::check_lot_spaces,
        lots::update_lot_reserved,
        lots::delete_lot,
        // Boundaries
        boundaries::add_lot_boundary,
        boundaries::edit_lot_boundary,
        boundaries::get_lot_boundary,
        // Spaces
        spaces::add_space,
        spaces::get_spaces,
        spaces::get_parking_space,
        spaces::update_space,
        spaces::edit_parking_space,
        spaces::delete_space,
        spaces::next_space_number,
        spaces::feature_preset,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            // Locations
            locations::LocationDto,
            locations::LocationRequest,
            locations::LocationDeleted,
            // Lots
            lots::LotDto,
            lots::CreateLotRequest,
            lots::EditIndoorLotRequest,
            lots::UpdateReservedRequest,
            lots::LotStatusDto,
            lots::SpaceSummaryDto,
            lots::SpaceFailureDto,
            lots::ReservationReportDto,
            // Boundaries
            boundaries::BoundaryRequest,
            boundaries::BoundarySavedDto,
            // Spaces
            spaces::SpaceDto,
            spaces::FeatureFlagsDto,
            spaces::FlagPatchDto,
            spaces::CreateSpaceRequest,
            spaces::UpdateSpaceRequest,
            spaces::EditSpaceRequest,
            spaces::NextSpaceNumberDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Locations", description = "Parking locations; deleting one removes its lots"),
        (name = "Lots", description = "Parking lots, indoor points and whole-lot reservation"),
        (name = "Boundaries", description = "Lot boundary polygons and computed centers"),
        (name = "Spaces", description = "Parking spaces, ID allocation and feature presets"),
    ),
    info(
        title = "Parking Admin API",
        version = "0.1.0",
        description = "REST API behind the parking administration dashboard"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let parking_routes = Router::new()
        // --- Locations ---
        .route("/get-all-locations", get(locations::list_locations))
        .route("/get-location/{locationID}", get(locations::get_location))
        .route("/add-location", post(locations::add_location))
        .route("/update-location", put(locations::update_location))
        .route(
            "/delete-location/{locationID}",
            delete(locations::delete_location),
        )
        // --- Lots ---
        .route("/get-all-lots", get(lots::list_lots))
        .route(
            "/get-lots-by-location/{locationID}",
            get(lots::lots_by_location),
        )
        .route("/get-lot/{lotID}", get(lots::get_lot))
        .route("/add-lot", post(lots::add_lot))
        .route("/edit-indoor-lot", post(lots::edit_indoor_lot))
        .route("/check-lot/{lotID}", get(lots::check_lot))
        .route("/check-lot-spaces/{lotID}", get(lots::check_lot_spaces))
        .route(
            "/update-lot-reserved/{lotID}",
            put(lots::update_lot_reserved),
        )
        .route("/delete-lot/{lotID}", delete(lots::delete_lot))
        // --- Boundaries (State<LotState>) ---
        .route("/add-lot-boundary", post(boundaries::add_lot_boundary))
        .route("/edit-lot-boundary", post(boundaries::edit_lot_boundary))
        .route(
            "/get-lot-boundary/{lotID}",
            get(boundaries::get_lot_boundary),
        )
        // --- Spaces ---
        .route("/add-space", post(spaces::add_space))
        .route("/get-spaces", get(spaces::get_spaces))
        .route("/get-parking-space/{id}", get(spaces::get_parking_space))
        .route("/update-space/{id}", put(spaces::update_space))
        .route("/edit-parking-space", post(spaces::edit_parking_space))
        .route("/delete-space/{id}", delete(spaces::delete_space))
        .route(
            "/get-next-space-number/{lotID}",
            get(spaces::next_space_number),
        )
        .route(
            "/feature-preset/{parkingType}",
            get(spaces::feature_preset),
        )
        .with_state(ParkingState::new(repos));

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(MetricsState {
            handle: prometheus_handle,
        });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(parking_routes)
        // route_layer so the middleware sees MatchedPath
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
