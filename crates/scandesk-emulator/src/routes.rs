//! HTTP routes of the emulated device.
//!
//! Status policy, matching the real device's observable behavior:
//! - 401 for a missing or wrong Basic authorization header
//! - 409 for a reservation attempt while a hold is active
//! - 403 for a reservation-scoped call with a missing, stale or expired id
//! - 404 for a resource the scan never produced

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use scandesk_core::IlluminationBand;
use scandesk_core::constants::{
    PARAM_RESERVATION_ID, SEGMENT_AGE_CHECK, SEGMENT_B900_CHECK, SEGMENT_CHECKSUMS,
    SEGMENT_EXPIRY_CHECK, SEGMENT_MRZ, SEGMENT_UV_DULLNESS,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::samples;
use crate::state::{EmulatorState, HoldCheck};

type Shared = Arc<EmulatorState>;
type Params = Query<HashMap<String, String>>;

pub(crate) fn router(state: Shared) -> Router {
    Router::new()
        .route(
            "/reservation",
            post(create_reservation)
                .put(extend_reservation)
                .delete(release_reservation),
        )
        .route("/system", get(system_info))
        .route("/scan/execute", put(scan_execute))
        .route("/scan/{scan}/{check}", get(check_resource))
        .route("/scan/{scan}/document/{band}", get(image_resource))
        .route("/device-mrz", get(device_mrz))
        .route("/document-state", get(document_state))
        .with_state(state)
}

fn authorized(state: &EmulatorState, headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(state.config().credentials.authorization())
}

/// Auth + reservation gate shared by every reservation-scoped route.
fn guard(state: &EmulatorState, headers: &HeaderMap, params: &HashMap<String, String>) -> Result<(), StatusCode> {
    if !authorized(state, headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let id = params.get(PARAM_RESERVATION_ID).map(String::as_str);
    if state.check(id) == HoldCheck::Rejected {
        debug!(?id, "rejected reservation-scoped call");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(())
}

#[derive(Deserialize)]
struct CreateReservation {
    timeout: u64,
}

async fn create_reservation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CreateReservation>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if !authorized(&state, &headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    match state.try_reserve(body.timeout) {
        Some(id) => Ok(Json(json!({ "reservationid": id }))),
        None => Err(StatusCode::CONFLICT),
    }
}

async fn extend_reservation(
    State(state): State<Shared>,
    Query(params): Params,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    if !authorized(&state, &headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    if state.extend(params.get(PARAM_RESERVATION_ID).map(String::as_str)) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

async fn release_reservation(
    State(state): State<Shared>,
    Query(params): Params,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    if !authorized(&state, &headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    if state.release(params.get(PARAM_RESERVATION_ID).map(String::as_str)) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

async fn system_info(
    State(state): State<Shared>,
    Query(params): Params,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard(&state, &headers, &params)?;
    Ok(Json(serde_json::to_value(samples::system_info()).map_err(internal)?))
}

async fn scan_execute(
    State(state): State<Shared>,
    Query(params): Params,
    headers: HeaderMap,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard(&state, &headers, &params)?;

    let scan_id = state.next_scan_id();
    let mut resources = Vec::new();

    for band in IlluminationBand::ALL {
        let enabled = request["lightSources"][band.as_segment()]["use"]
            .as_bool()
            .unwrap_or(false);
        if enabled {
            resources.push(format!("/scan/{scan_id}/document/{band}"));
        }
    }

    let toggles = [
        ("getMrz", SEGMENT_MRZ),
        ("MrzChecksumsCheck", SEGMENT_CHECKSUMS),
        ("MrzAgeCheck", SEGMENT_AGE_CHECK),
        ("MrzExpiryCheck", SEGMENT_EXPIRY_CHECK),
        ("checkUvDullness", SEGMENT_UV_DULLNESS),
        ("checkB900Ink", SEGMENT_B900_CHECK),
    ];
    for (field, segment) in toggles {
        if request[field].as_bool().unwrap_or(false) {
            resources.push(format!("/scan/{scan_id}/{segment}"));
        }
    }

    debug!(scan_id, resources = resources.len(), "scan executed");
    Ok(Json(json!({ "resourceList": resources })))
}

async fn check_resource(
    State(state): State<Shared>,
    Path((_scan, check)): Path<(String, String)>,
    Query(params): Params,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard(&state, &headers, &params)?;

    if let Some(delay) = state.delay_for(&check) {
        tokio::time::sleep(delay).await;
    }

    let payload = match check.as_str() {
        SEGMENT_CHECKSUMS | SEGMENT_AGE_CHECK | SEGMENT_EXPIRY_CHECK => {
            serde_json::to_value(samples::check_result())
        }
        SEGMENT_UV_DULLNESS => serde_json::to_value(samples::uv_dullness()),
        SEGMENT_B900_CHECK => serde_json::to_value(samples::b900_check()),
        SEGMENT_MRZ => serde_json::to_value(samples::mrz()),
        _ => return Err(StatusCode::NOT_FOUND),
    };

    Ok(Json(payload.map_err(internal)?))
}

async fn image_resource(
    State(state): State<Shared>,
    Path((_scan, band)): Path<(String, String)>,
    Query(params): Params,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard(&state, &headers, &params)?;

    let band = IlluminationBand::from_segment(&band).ok_or(StatusCode::NOT_FOUND)?;

    if let Some(delay) = state.delay_for(band.as_segment()) {
        tokio::time::sleep(delay).await;
    }

    Ok(Json(serde_json::to_value(samples::image(band)).map_err(internal)?))
}

async fn device_mrz(
    State(state): State<Shared>,
    Query(params): Params,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard(&state, &headers, &params)?;
    Ok(Json(json!({ "accepted": true })))
}

async fn document_state(
    State(state): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if !authorized(&state, &headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let present = state.config().document_present;
    Ok(Json(json!({ "present": present, "stable": present })))
}

fn internal<E: std::fmt::Display>(error: E) -> StatusCode {
    tracing::error!(%error, "emulator response encoding failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
