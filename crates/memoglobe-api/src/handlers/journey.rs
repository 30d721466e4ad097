//! Journey route handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use memoglobe_core::{
    validate_uuid, Error, GetRouteResponse, ListRoutesResponse, RouteProgress,
};

use crate::{ApiError, AppState, RequireAuth};

/// GET /journey/routes
#[utoipa::path(get, path = "/journey/routes", tag = "Journey",
    responses(
        (status = 200, description = "The current journey route", body = ListRoutesResponse),
        (status = 401, description = "Missing or invalid bearer token")))]
pub async fn list_routes(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ListRoutesResponse>, ApiError> {
    let route = state.store.read().await.route();
    Ok(Json(ListRoutesResponse {
        routes: vec![route],
    }))
}

/// GET /journey/routes/:route_id
#[utoipa::path(get, path = "/journey/routes/{route_id}", tag = "Journey",
    params(("route_id" = String, Path, description = "Route id")),
    responses(
        (status = 200, description = "Route with resolved stops", body = GetRouteResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Not the current route"),
        (status = 422, description = "Malformed route id")))]
pub async fn get_route(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<Json<GetRouteResponse>, ApiError> {
    let route_id = validate_uuid(&route_id, "route_id")?;
    let store = state.store.read().await;
    let route = store.route();
    if route.id != route_id {
        return Err(Error::RouteNotFound(route_id).into());
    }

    let stops = store.route_stops(&route);
    let progress = RouteProgress {
        completed: 0,
        total: stops.len(),
    };
    Ok(Json(GetRouteResponse {
        route,
        stops,
        progress,
    }))
}
