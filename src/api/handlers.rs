//! HTTP request handlers for the states API.
//!
//! This module contains the handler functions for all API endpoints and the
//! router that wires them together.

use axum::{
    async_trait,
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, Query, Request, State,
    },
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::{Html, IntoResponse},
    routing::{get, MethodRouter},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

use crate::error::StatesError;
use crate::models::{EnrichedState, FunFactsView};

use super::middleware::log_requests;
use super::request::{AddFactsRequest, DeleteFactRequest, StatesQuery, UpdateFactRequest};
use super::resolver::ResolvedState;
use super::response::{
    AdmissionResponse, ApiError, ApiErrorResponse, CapitalResponse, FunFactResponse,
    NicknameResponse, PopulationResponse,
};
use super::state::AppState;

const INDEX_PAGE: &str = include_str!("../../public/index.html");
const NOT_FOUND_PAGE: &str = include_str!("../../public/404.html");

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", page_route(get(index_page)))
        .route("/states", page_route(get(list_states)))
        .route("/states/:state", page_route(get(get_state)))
        .route("/states/:state/capital", page_route(get(get_capital)))
        .route("/states/:state/nickname", page_route(get(get_nickname)))
        .route("/states/:state/population", page_route(get(get_population)))
        .route("/states/:state/admission", page_route(get(get_admission)))
        .route(
            "/states/:state/funfact",
            page_route(
                get(get_funfact)
                    .post(add_funfacts)
                    .patch(update_funfact)
                    .delete(delete_funfact),
            ),
        )
        .fallback(not_found_page)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Unsupported methods on a known path get the not-found page too.
fn page_route(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(not_found_page)
}

async fn index_page() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn not_found_page() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}

/// Handler for GET /states.
async fn list_states(
    State(state): State<AppState>,
    query: Result<Query<StatesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EnrichedState>>> {
    let Query(query) = query.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Query string rejected");
        state.reject(StatesError::validation(rejection.body_text()))
    })?;
    let contiguity = query.contiguity().map_err(|e| state.reject(e))?;
    let states = state
        .funfacts()
        .list_all(contiguity)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(states))
}

/// Handler for GET /states/:state.
async fn get_state(
    State(state): State<AppState>,
    ResolvedState(record): ResolvedState,
) -> ApiResult<Json<EnrichedState>> {
    let enriched = state
        .funfacts()
        .get_one(&record)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(enriched))
}

async fn get_capital(ResolvedState(record): ResolvedState) -> Json<CapitalResponse> {
    Json(CapitalResponse {
        state: record.name,
        capital: record.capital_city,
    })
}

async fn get_nickname(ResolvedState(record): ResolvedState) -> Json<NicknameResponse> {
    Json(NicknameResponse {
        state: record.name,
        nickname: record.nickname,
    })
}

async fn get_population(ResolvedState(record): ResolvedState) -> Json<PopulationResponse> {
    let population = record.formatted_population();
    Json(PopulationResponse {
        state: record.name,
        population,
    })
}

async fn get_admission(ResolvedState(record): ResolvedState) -> Json<AdmissionResponse> {
    Json(AdmissionResponse {
        state: record.name,
        admitted: record.admission_date.format("%Y-%m-%d").to_string(),
    })
}

/// Handler for GET /states/:state/funfact.
///
/// A state without facts is a missing resource here, so the usual 400 for
/// `NoFunFacts` becomes 404.
async fn get_funfact(
    State(state): State<AppState>,
    ResolvedState(record): ResolvedState,
) -> ApiResult<Json<FunFactResponse>> {
    match state.funfacts().random_fact(&record).await {
        Ok(funfact) => Ok(Json(FunFactResponse { funfact })),
        Err(err @ StatesError::NoFunFacts { .. }) => {
            Err(state.reject(err).with_status(StatusCode::NOT_FOUND))
        }
        Err(err) => Err(state.reject(err)),
    }
}

/// Handler for POST /states/:state/funfact.
///
/// Responds 201 when facts were supplied and 200 for an empty batch.
async fn add_funfacts(
    State(state): State<AppState>,
    ResolvedState(record): ResolvedState,
    JsonBody(request): JsonBody<AddFactsRequest>,
) -> ApiResult<(StatusCode, Json<FunFactsView>)> {
    let facts = request.into_facts().map_err(|e| state.reject(e))?;

    let outcome = state
        .mutations()
        .add_facts(&record, facts)
        .await
        .map_err(|e| state.reject(e))?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.view)))
}

/// Handler for PATCH /states/:state/funfact.
async fn update_funfact(
    State(state): State<AppState>,
    ResolvedState(record): ResolvedState,
    JsonBody(request): JsonBody<UpdateFactRequest>,
) -> ApiResult<Json<FunFactsView>> {
    let (index, text) = request.into_update().map_err(|e| state.reject(e))?;

    let view = state
        .mutations()
        .update_fact(&record, index, text)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(view))
}

/// Handler for DELETE /states/:state/funfact.
async fn delete_funfact(
    State(state): State<AppState>,
    ResolvedState(record): ResolvedState,
    JsonBody(request): JsonBody<DeleteFactRequest>,
) -> ApiResult<Json<FunFactsView>> {
    let index = request.into_index().map_err(|e| state.reject(e))?;

    let view = state
        .mutations()
        .delete_fact(&record, index)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(view))
}

/// A JSON request body.
///
/// A body that is empty, or sent without a JSON content type, reads as
/// `T::default()`, so its missing fields are reported by validation.
struct JsonBody<T>(T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            warn!(error = %rejection.body_text(), "Failed to read request body");
            ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::malformed_json(rejection.body_text()),
            )
        })?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            debug!(is_json, "Request without JSON body");
            return Ok(JsonBody(T::default()));
        }
        Json::<T>::from_bytes(&bytes)
            .map(|Json(body)| JsonBody(body))
            .map_err(json_rejection)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(mime) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };
    let mime = mime.trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Maps JSON parse failures onto 400 responses.
fn json_rejection(rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonSyntaxError(err) => {
            warn!(error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(error = %body_text, "JSON data error");
            ApiError::malformed_json(body_text)
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error)
}
