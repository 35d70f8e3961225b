use super::protocol::{
    ENDPOINT_SCRAPE, ENDPOINT_SEARCH, ServiceReply, collection_endpoint, normalize_records,
    record_endpoint, service_error,
};
use crate::config::ClientConfig;
use crate::error::{CatalogError, Result};
use crate::query::compiler::compile;
use crate::query::types::{ObjectKind, SCORE_FIELD, SearchQuery};
use crate::ranking::ranker;
use crate::ranking::types::Dataset;
use crate::records::pending::PendingBatch;
use crate::records::types::Record;
use reqwest::StatusCode;
use serde_json::Value;

/// HTTP client for the catalog service.
///
/// Every call is a single round trip: no retries, no timeouts, no caching.
/// Clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.catalog_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs a compiled query and returns the matching records in the order
    /// the service sent them.
    ///
    /// The object kind is read from the query prefix. A 404 from the service
    /// means nothing matched and yields an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<Record>> {
        let kind = ObjectKind::of_query(query)?;
        let url = format!(
            "{}{}?q={}",
            self.base_url,
            ENDPOINT_SEARCH,
            urlencoding::encode(query)
        );
        tracing::debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!("No {} records match `{}`", kind, query);
            return Ok(Vec::new());
        }

        if !status.is_success() {
            return Err(rejection(response).await);
        }

        let body = response.json::<Value>().await?;
        let records = normalize_records(kind, body)?;
        tracing::info!("Search `{}` returned {} record(s)", query, records.len());
        Ok(records)
    }

    pub async fn search_query(&self, query: &SearchQuery) -> Result<Vec<Record>> {
        self.search(&compile(query)).await
    }

    /// Fetches every record of `kind` and ranks it by rating.
    pub async fn top_k(&self, kind: ObjectKind, k: usize) -> Result<Dataset> {
        let records = self.search_query(&SearchQuery::all(kind)).await?;
        let dataset = ranker::top_k(&records, SCORE_FIELD, k);
        tracing::info!(
            "Ranked {} of {} {} record(s) (k={})",
            dataset.len(),
            records.len(),
            kind,
            k
        );
        Ok(dataset)
    }

    pub async fn get(&self, kind: ObjectKind, id: &str) -> Result<Record> {
        let url = self.record_url(kind, Some(id));
        tracing::debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response.json::<Value>().await?;
        Record::from_value(kind, body)
    }

    pub async fn delete(&self, kind: ObjectKind, id: &str) -> Result<ServiceReply> {
        let url = self.record_url(kind, Some(id));
        tracing::debug!("DELETE {}", url);
        self.reply(self.http.delete(url)).await
    }

    /// Replaces the attributes of record `id`. The identifier itself is not
    /// part of the body.
    pub async fn update(&self, id: &str, record: &Record) -> Result<ServiceReply> {
        let url = self.record_url(record.kind(), Some(id));
        tracing::debug!("PUT {}", url);
        self.reply(self.http.put(url).json(&record.without_identifier()))
            .await
    }

    pub async fn create(&self, record: &Record) -> Result<ServiceReply> {
        if record.identifier().is_none() {
            return Err(CatalogError::MissingIdentifier(record.kind()));
        }
        let url = self.record_url(record.kind(), None);
        tracing::debug!("POST {}", url);
        self.reply(self.http.post(url).json(record)).await
    }

    pub async fn create_many(&self, kind: ObjectKind, records: &[Record]) -> Result<ServiceReply> {
        if let Some(other) = records.iter().find(|record| record.kind() != kind) {
            return Err(CatalogError::KindMismatch {
                expected: kind,
                found: other.kind(),
            });
        }
        let url = format!("{}{}", self.base_url, collection_endpoint(kind));
        tracing::debug!("POST {} ({} records)", url, records.len());
        self.reply(self.http.post(url).json(records)).await
    }

    /// Bulk-creates everything in `batch`.
    ///
    /// The batch is emptied once the service has answered; if the request
    /// never got an answer the records are put back.
    pub async fn flush(&self, batch: &mut PendingBatch) -> Result<ServiceReply> {
        let records = batch.take();
        match self.create_many(batch.kind(), &records).await {
            Ok(reply) => Ok(reply),
            Err(err) => {
                tracing::error!(
                    "Failed to flush {} pending {} record(s): {}",
                    records.len(),
                    batch.kind(),
                    err
                );
                batch.restore(records);
                Err(err)
            }
        }
    }

    /// Asks the service to scrape and store the page at `url`.
    pub async fn scrape(&self, url: &str) -> Result<ServiceReply> {
        let endpoint = format!(
            "{}{}?attr={}",
            self.base_url,
            ENDPOINT_SCRAPE,
            urlencoding::encode(url)
        );
        tracing::debug!("POST {}", endpoint);
        self.reply(self.http.post(endpoint)).await
    }

    fn record_url(&self, kind: ObjectKind, id: Option<&str>) -> String {
        match id {
            Some(id) => format!(
                "{}{}?id={}",
                self.base_url,
                record_endpoint(kind),
                urlencoding::encode(id)
            ),
            None => format!("{}{}", self.base_url, record_endpoint(kind)),
        }
    }

    async fn reply(&self, request: reqwest::RequestBuilder) -> Result<ServiceReply> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = lenient_body(response).await;

        let reply = ServiceReply { status, body };
        if reply.is_success() {
            tracing::info!("{}", reply.message());
        } else {
            tracing::warn!("Service answered {}: {}", status, reply.message());
        }
        Ok(reply)
    }
}

/// Turns a non-success answer into a service error, whatever its body holds.
async fn rejection(response: reqwest::Response) -> CatalogError {
    let status = response.status().as_u16();
    let body = lenient_body(response).await;
    service_error(status, &body)
}

async fn lenient_body(response: reqwest::Response) -> Value {
    response
        .json::<Value>()
        .await
        .unwrap_or_else(|_| serde_json::json!({"error": "invalid json"}))
}
