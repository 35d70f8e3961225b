use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Json, Router, routing::get, routing::post};
use catalog_client::chart::types::ChartModel;
use catalog_client::chart::{projector, svg};
use catalog_client::config::ClientConfig;
use catalog_client::error::CatalogError;
use catalog_client::gateway::client::CatalogClient;
use catalog_client::gateway::protocol::ServiceReply;
use catalog_client::gateway::sequence::RequestSequencer;
use catalog_client::query::types::{
    AttributeClause, CompoundClause, FieldSelector, LogicalOperator, ObjectKind, SearchQuery,
};
use catalog_client::ranking::types::Dataset;
use catalog_client::records::pending::PendingBatch;
use catalog_client::records::types::Record;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct AppState {
    client: CatalogClient,
    config: ClientConfig,
    pending: Arc<DashMap<ObjectKind, PendingBatch>>,
    ranking: Arc<RequestSequencer>,
}

#[derive(Deserialize)]
struct KindParams {
    kind: ObjectKind,
}

#[derive(Deserialize)]
struct RecordParams {
    kind: ObjectKind,
    id: String,
}

#[derive(Deserialize)]
struct SearchParams {
    kind: ObjectKind,
    field: String,
    #[serde(default)]
    value: String,
    op: Option<String>,
    field2: Option<String>,
    value2: Option<String>,
}

#[derive(Deserialize)]
struct TopParams {
    kind: ObjectKind,
    k: Option<usize>,
}

#[derive(Deserialize)]
struct ScrapeParams {
    url: String,
}

#[derive(Serialize)]
struct SearchResponse {
    query: String,
    records: Vec<Record>,
}

#[derive(Serialize)]
struct TopResponse {
    kind: ObjectKind,
    k: usize,
    dataset: Dataset,
    chart: ChartModel,
    svg: String,
}

#[derive(Serialize)]
struct PendingResponse {
    kind: ObjectKind,
    pending: usize,
    records: Vec<Record>,
}

type ApiError = (StatusCode, String);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::from_env()?;
    let bind_addr = config.ui_bind;

    let state = AppState {
        client: CatalogClient::from_config(&config),
        config,
        pending: Arc::new(DashMap::new()),
        ranking: Arc::new(RequestSequencer::new()),
    };

    let app = Router::new()
        .route("/", get(ui))
        .route(
            "/api/record",
            get(api_get_record)
                .delete(api_delete_record)
                .put(api_update_record)
                .post(api_create_record),
        )
        .route("/api/search", get(api_search))
        .route("/api/top", get(api_top))
        .route("/api/pending", get(api_pending).post(api_append_pending))
        .route("/api/pending/flush", post(api_flush_pending))
        .route("/api/scrape", post(api_scrape))
        .with_state(state.clone());

    tracing::info!(
        "UI listening on {} (catalog service at {})",
        bind_addr,
        state.client.base_url()
    );
    axum::serve(tokio::net::TcpListener::bind(bind_addr).await?, app).await?;

    Ok(())
}

async fn ui() -> Html<&'static str> {
    Html(include_str!("ui.html"))
}

async fn api_get_record(
    State(state): State<AppState>,
    Query(params): Query<RecordParams>,
) -> Result<Json<Record>, ApiError> {
    let record = state
        .client
        .get(params.kind, &params.id)
        .await
        .map_err(api_error)?;
    Ok(Json(record))
}

async fn api_delete_record(
    State(state): State<AppState>,
    Query(params): Query<RecordParams>,
) -> Result<Json<ServiceReply>, ApiError> {
    let reply = state
        .client
        .delete(params.kind, &params.id)
        .await
        .map_err(api_error)?;
    Ok(Json(reply))
}

async fn api_update_record(
    State(state): State<AppState>,
    Query(params): Query<RecordParams>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ServiceReply>, ApiError> {
    let record = Record::from_value(params.kind, body).map_err(api_error)?;
    let reply = state
        .client
        .update(&params.id, &record)
        .await
        .map_err(api_error)?;
    Ok(Json(reply))
}

async fn api_create_record(
    State(state): State<AppState>,
    Query(params): Query<KindParams>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ServiceReply>, ApiError> {
    let record = Record::from_value(params.kind, body).map_err(api_error)?;
    let reply = state.client.create(&record).await.map_err(api_error)?;
    Ok(Json(reply))
}

async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = build_query(&params).map_err(api_error)?;
    let records = state
        .client
        .search_query(&query)
        .await
        .map_err(api_error)?;

    Ok(Json(SearchResponse {
        query: query.to_string(),
        records,
    }))
}

/// Ranks and charts the top K records of a kind.
///
/// Only the most recently issued ranking request may answer with data; an
/// overtaken one gets `409` so the page keeps the newer chart.
async fn api_top(
    State(state): State<AppState>,
    Query(params): Query<TopParams>,
) -> Result<Response, ApiError> {
    let k = params.k.unwrap_or(state.config.default_top_k);
    let ticket = state.ranking.issue();

    let dataset = state
        .client
        .top_k(params.kind, k)
        .await
        .map_err(api_error)?;

    if !state.ranking.is_current(ticket) {
        tracing::warn!("Discarding stale top-{} {} ranking", k, params.kind);
        let body = serde_json::json!({"stale": true});
        return Ok((StatusCode::CONFLICT, Json(body)).into_response());
    }

    let chart = projector::project(&dataset);
    let caption = svg::caption(params.kind, dataset.len());
    let svg = svg::render(&chart, &caption);

    Ok(Json(TopResponse {
        kind: params.kind,
        k,
        dataset,
        chart,
        svg,
    })
    .into_response())
}

async fn api_pending(
    State(state): State<AppState>,
    Query(params): Query<KindParams>,
) -> Json<PendingResponse> {
    let records = state
        .pending
        .get(&params.kind)
        .map(|batch| batch.records().to_vec())
        .unwrap_or_default();

    Json(PendingResponse {
        kind: params.kind,
        pending: records.len(),
        records,
    })
}

async fn api_append_pending(
    State(state): State<AppState>,
    Query(params): Query<KindParams>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<PendingResponse>, ApiError> {
    let record = Record::from_value(params.kind, body).map_err(api_error)?;

    let mut batch = state
        .pending
        .entry(params.kind)
        .or_insert_with(|| PendingBatch::new(params.kind));
    let pending = batch.append(record).map_err(api_error)?;
    tracing::info!("{} pending {} record(s)", pending, params.kind);

    Ok(Json(PendingResponse {
        kind: params.kind,
        pending,
        records: batch.records().to_vec(),
    }))
}

/// Bulk-creates the pending records of a kind. On a transport failure they
/// are put back in front of anything appended meanwhile.
async fn api_flush_pending(
    State(state): State<AppState>,
    Query(params): Query<KindParams>,
) -> Result<Json<ServiceReply>, ApiError> {
    let mut batch = match state.pending.remove(&params.kind) {
        Some((_, batch)) => batch,
        None => PendingBatch::new(params.kind),
    };

    let result = state.client.flush(&mut batch).await;
    if !batch.is_empty() {
        state
            .pending
            .entry(params.kind)
            .or_insert_with(|| PendingBatch::new(params.kind))
            .restore(batch.take());
    }

    result.map(Json).map_err(api_error)
}

async fn api_scrape(
    State(state): State<AppState>,
    Query(params): Query<ScrapeParams>,
) -> Result<Json<ServiceReply>, ApiError> {
    let reply = state.client.scrape(&params.url).await.map_err(api_error)?;
    Ok(Json(reply))
}

fn build_query(params: &SearchParams) -> Result<SearchQuery, CatalogError> {
    let first = AttributeClause::new(
        FieldSelector::parse(params.kind, &params.field)?,
        params.value.as_str(),
    );

    let op = match params.op.as_deref().map(str::trim) {
        Some(op) if !op.is_empty() => op.parse::<LogicalOperator>()?,
        _ => return Ok(first.into()),
    };

    // an operator without a second field is rejected, not narrowed to one clause
    let field2 = params.field2.as_deref().unwrap_or_default();
    let second = AttributeClause::new(
        FieldSelector::parse(params.kind, field2)?,
        params.value2.clone().unwrap_or_default(),
    );
    Ok(CompoundClause::new(first, op, second)?.into())
}

fn api_error(err: CatalogError) -> ApiError {
    let status = match &err {
        CatalogError::Network(_) | CatalogError::Decode(_) => StatusCode::BAD_GATEWAY,
        CatalogError::Service { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        _ => StatusCode::BAD_REQUEST,
    };
    if status.is_server_error() {
        tracing::error!("{}", err);
    } else {
        tracing::warn!("{}", err);
    }
    (status, err.to_string())
}
