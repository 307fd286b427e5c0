use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use models::{CheckInInput, LuggageItem};
use serde::{Deserialize, Serialize};
use service::luggage::{CheckInOutcome, CollectOutcome, RemoveOutcome, RequestContext};

use crate::errors::JsonApiError;
use crate::observability;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct OutcomeBody<T> {
    pub result: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyRequest {
    pub collection_point: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OwnerCheck {
    pub is_owner: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Stats {
    pub total_bags: usize,
}

/// Record the outcome label for `operation`, then turn errors into responses.
fn observe<T>(operation: &str, res: Result<T, service::errors::ServiceError>, label: impl FnOnce(&T) -> &'static str) -> Result<T, JsonApiError> {
    match res {
        Ok(v) => {
            observability::record(operation, label(&v));
            Ok(v)
        }
        Err(e) => {
            observability::record(operation, e.kind());
            Err(e.into())
        }
    }
}

#[utoipa::path(post, path = "/luggage", tag = "luggage", request_body = crate::openapi::CheckInRequestDoc,
    responses((status = 201, description = "Checked in", body = crate::openapi::OutcomeDoc), (status = 409, description = "Id already exists", body = crate::openapi::OutcomeDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc)))]
pub async fn check_in(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<CheckInInput>, JsonRejection>,
) -> Result<(StatusCode, Json<OutcomeBody<CheckInOutcome>>), JsonApiError> {
    let Json(input) = payload?;
    let res = state.luggage.check_in(&ctx, input).await;
    let outcome = observe("check_in", res, |o| match o {
        CheckInOutcome::Ok => "ok",
        CheckInOutcome::IdAlreadyExists => "id_already_exists",
    })?;
    let status = match outcome {
        CheckInOutcome::Ok => StatusCode::CREATED,
        CheckInOutcome::IdAlreadyExists => StatusCode::CONFLICT,
    };
    Ok((status, Json(OutcomeBody { result: outcome })))
}

#[utoipa::path(get, path = "/luggage", tag = "luggage", responses((status = 200, description = "All records", body = [crate::openapi::LuggageItemDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<LuggageItem>>, JsonApiError> {
    Ok(Json(state.luggage.list().await?))
}

#[utoipa::path(get, path = "/luggage/{id}", tag = "luggage", params(("id" = String, Path, description = "Luggage tag id")),
    responses((status = 200, description = "OK", body = crate::openapi::LuggageItemDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)))]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<LuggageItem>, JsonApiError> {
    match state.luggage.get(&id).await? {
        Some(item) => Ok(Json(item)),
        None => Err(service::errors::ServiceError::not_found("luggage", &id).into()),
    }
}

#[utoipa::path(delete, path = "/luggage/{id}", tag = "luggage", params(("id" = String, Path, description = "Luggage tag id")),
    responses((status = 204, description = "Removed"), (status = 404, description = "Not present", body = crate::openapi::OutcomeDoc), (status = 403, description = "Invalid owner", body = crate::openapi::OutcomeDoc)))]
pub async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Response, JsonApiError> {
    let res = state.luggage.remove(&ctx, &id).await;
    let outcome = observe("remove", res, |o| match o {
        RemoveOutcome::Removed => "removed",
        RemoveOutcome::NotPresent => "not_present",
        RemoveOutcome::InvalidOwner => "invalid_owner",
    })?;
    let res = match outcome {
        RemoveOutcome::Removed => StatusCode::NO_CONTENT.into_response(),
        RemoveOutcome::NotPresent => (StatusCode::NOT_FOUND, Json(OutcomeBody { result: outcome })).into_response(),
        RemoveOutcome::InvalidOwner => (StatusCode::FORBIDDEN, Json(OutcomeBody { result: outcome })).into_response(),
    };
    Ok(res)
}

#[utoipa::path(post, path = "/luggage/{id}/en-route", tag = "luggage", params(("id" = String, Path, description = "Luggage tag id")),
    responses((status = 200, description = "Updated", body = crate::openapi::LuggageItemDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc), (status = 409, description = "Invalid transition", body = crate::openapi::ErrorDoc)))]
pub async fn en_route(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<LuggageItem>, JsonApiError> {
    let res = state.luggage.en_route(&id).await;
    observe("en_route", res, |_| "ok").map(Json)
}

#[utoipa::path(post, path = "/luggage/{id}/ready", tag = "luggage", params(("id" = String, Path, description = "Luggage tag id")), request_body = crate::openapi::ReadyRequestDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::LuggageItemDoc), (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc), (status = 409, description = "Invalid transition", body = crate::openapi::ErrorDoc)))]
pub async fn ready_for_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReadyRequest>, JsonRejection>,
) -> Result<Json<LuggageItem>, JsonApiError> {
    let Json(body) = payload?;
    let res = state.luggage.ready_for_collection(&id, &body.collection_point).await;
    observe("ready_for_collection", res, |_| "ok").map(Json)
}

#[utoipa::path(post, path = "/luggage/{id}/collect", tag = "luggage", params(("id" = String, Path, description = "Luggage tag id")),
    responses((status = 200, description = "Collected", body = crate::openapi::OutcomeDoc), (status = 403, description = "Invalid owner", body = crate::openapi::OutcomeDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc), (status = 409, description = "Invalid transition", body = crate::openapi::ErrorDoc)))]
pub async fn collect(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<OutcomeBody<CollectOutcome>>), JsonApiError> {
    let res = state.luggage.collect(&ctx, &id).await;
    let outcome = observe("collect", res, |o| match o {
        CollectOutcome::Collected => "collected",
        CollectOutcome::InvalidOwner => "invalid_owner",
    })?;
    let status = match outcome {
        CollectOutcome::Collected => StatusCode::OK,
        CollectOutcome::InvalidOwner => StatusCode::FORBIDDEN,
    };
    Ok((status, Json(OutcomeBody { result: outcome })))
}

#[utoipa::path(get, path = "/luggage/{id}/owner", tag = "luggage", params(("id" = String, Path, description = "Luggage tag id")),
    responses((status = 200, description = "Ownership check", body = crate::openapi::OwnerCheckDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)))]
pub async fn verify_owner(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<OwnerCheck>, JsonApiError> {
    let is_owner = state.luggage.verify_owner(&ctx, &id).await?;
    Ok(Json(OwnerCheck { is_owner }))
}

#[utoipa::path(get, path = "/stats", tag = "luggage", responses((status = 200, description = "Record count", body = crate::openapi::StatsDoc)))]
pub async fn stats(State(state): State<AppState>) -> Result<Json<Stats>, JsonApiError> {
    Ok(Json(Stats { total_bags: state.luggage.count().await? }))
}
