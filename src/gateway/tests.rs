//! Gateway Module Tests
//!
//! Runs `CatalogClient` against an in-process axum server that imitates the
//! catalog service's endpoints and status objects.
//!
//! ## Test Scopes
//! - **Search**: Single/array normalization, empty results, error statuses, encoding.
//! - **Records**: Lookup, delete, update, create and bulk create.
//! - **Pending**: Flush semantics on success and transport failure.
//! - **Sequencer**: Stale ticket detection.

#[cfg(test)]
mod tests {
    use crate::error::CatalogError;
    use crate::gateway::client::CatalogClient;
    use crate::gateway::protocol::{ServiceReply, describe_body};
    use crate::gateway::sequence::RequestSequencer;
    use crate::query::types::{
        AttributeClause, BookField, CompoundClause, LogicalOperator, ObjectKind, SearchQuery,
    };
    use crate::records::pending::PendingBatch;
    use crate::records::types::Record;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Every request the fake service saw, as `METHOD path?query body`.
    type Seen = Arc<Mutex<Vec<String>>>;

    fn log(seen: &Seen, entry: String) {
        seen.lock().unwrap().push(entry);
    }

    async fn search_handler(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        let q = params.get("q").cloned().unwrap_or_default();
        log(&seen, format!("GET /api/search q={}", q));

        match q.as_str() {
            "book.title:Dune" => {
                Json(json!({"book_id": "1", "title": "Dune", "rating": "4.3"})).into_response()
            }
            "book.book_id:" => Json(json!([
                {"book_id": "1", "title": "Dune", "rating": "4.3"},
                {"book_id": "2", "title": "Emma", "rating": "3.9"},
                {"book_id": "3", "title": "Untitled"},
                {"book_id": "4", "title": "Ulysses", "rating": "4.3"}
            ]))
            .into_response(),
            "author.author_id:" => {
                (StatusCode::NOT_FOUND, Json(json!({"GET error": "Result is not found in database"})))
                    .into_response()
            }
            "book.rating:high" => (
                StatusCode::BAD_REQUEST,
                Json(json!({"GET error": "Value type of the field should be number"})),
            )
                .into_response(),
            "book.title:garbled" => "<html>oops</html>".into_response(),
            "book.title:crash" => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "<html><h1>Internal Server Error</h1></html>",
            )
                .into_response(),
            "book.title:alien" => Json(json!({"book_id": "9", "publisher": "Ace"})).into_response(),
            _ => Json(json!([])).into_response(),
        }
    }

    async fn book_get(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        let id = params.get("id").cloned().unwrap_or_default();
        log(&seen, format!("GET /api/book id={}", id));
        if id == "1" {
            Json(json!({"book_id": "1", "title": "Dune", "rating": "4.3"})).into_response()
        } else if id == "crash" {
            (StatusCode::INTERNAL_SERVER_ERROR, "<html>Internal Server Error</html>").into_response()
        } else {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"GET error": format!("Book with id {} is not found", id)})),
            )
                .into_response()
        }
    }

    async fn book_delete(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        let id = params.get("id").cloned().unwrap_or_default();
        log(&seen, format!("DELETE /api/book id={}", id));
        Json(json!({"DELETE success": format!("Book with id {} is deleted", id)}))
    }

    async fn book_put(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let id = params.get("id").cloned().unwrap_or_default();
        log(&seen, format!("PUT /api/book id={} {}", id, body));
        Json(json!({"PUT success": format!("Book with id {} is updated", id)}))
    }

    async fn book_post(State(seen): State<Seen>, Json(body): Json<Value>) -> Response {
        log(&seen, format!("POST /api/book {}", body));
        if body["book_id"] == json!("1") {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"POST input error": "Book with id 1 already exists"})),
            )
                .into_response()
        } else {
            Json(json!({"POST success": "Book is inserted"})).into_response()
        }
    }

    async fn books_post(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
        let count = body.as_array().map(|items| items.len()).unwrap_or(0);
        log(&seen, format!("POST /api/books {}", count));
        Json(json!({"POST success": format!("{} books inserted", count)}))
    }

    async fn scrape_post(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        let attr = params.get("attr").cloned().unwrap_or_default();
        log(&seen, format!("POST /api/scrape attr={}", attr));
        Json(json!({"POST success": "Book with id 3735293 is inserted"}))
    }

    async fn spawn_service() -> (CatalogClient, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/api/search", get(search_handler))
            .route("/api/book", get(book_get).delete(book_delete).put(book_put).post(book_post))
            .route("/api/books", post(books_post))
            .route("/api/scrape", post(scrape_post))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (CatalogClient::new(&format!("http://{}/", addr)), seen)
    }

    /// A client pointed at a port nobody listens on.
    async fn unreachable_client() -> CatalogClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        CatalogClient::new(&format!("http://{}", addr))
    }

    fn book(id: &str) -> Record {
        Record::new(ObjectKind::Book)
            .with("book_id", id)
            .unwrap()
            .with("title", "Pending")
            .unwrap()
    }

    // ============================================================
    // SEARCH TESTS
    // ============================================================

    #[tokio::test]
    async fn test_search_single_object_becomes_one_record() {
        let (client, _) = spawn_service().await;

        let records = client.search("book.title:Dune").await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), ObjectKind::Book);
        assert_eq!(records[0].identifier().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_search_array_preserves_order() {
        let (client, _) = spawn_service().await;

        let records = client
            .search_query(&SearchQuery::all(ObjectKind::Book))
            .await
            .unwrap();

        let ids: Vec<String> = records.iter().filter_map(|r| r.identifier()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_search_not_found_is_empty() {
        let (client, _) = spawn_service().await;

        let records = client.search("author.author_id:").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_search_bad_request_is_service_error() {
        let (client, _) = spawn_service().await;

        match client.search("book.rating:high").await {
            Err(CatalogError::Service { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("should be number"));
            }
            other => panic!("expected Service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_server_error_page_is_service_error() {
        let (client, _) = spawn_service().await;

        match client.search("book.title:crash").await {
            Err(CatalogError::Service { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "error: invalid json");
            }
            other => panic!("expected Service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_undecodable_body_is_network_error() {
        let (client, _) = spawn_service().await;

        let result = client.search("book.title:garbled").await;
        assert!(matches!(result, Err(CatalogError::Network(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_unknown_attributes() {
        let (client, _) = spawn_service().await;

        let result = client.search("book.title:alien").await;
        assert!(matches!(result, Err(CatalogError::UnknownAttribute { .. })));
    }

    #[tokio::test]
    async fn test_search_transport_failure_is_network_error() {
        let client = unreachable_client().await;

        let result = client.search("book.title:Dune").await;
        assert!(matches!(result, Err(CatalogError::Network(_))));
    }

    #[tokio::test]
    async fn test_search_sends_query_verbatim() {
        let (client, seen) = spawn_service().await;
        let compound = CompoundClause::new(
            AttributeClause::new(BookField::Title, "War & Peace"),
            LogicalOperator::Or,
            AttributeClause::new(BookField::Author, "Tolstoy?"),
        )
        .unwrap();

        client.search_query(&compound.into()).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.last().unwrap(),
            "GET /api/search q=book.title:War & PeaceORbook.author:Tolstoy?"
        );
    }

    #[tokio::test]
    async fn test_top_k_over_service() {
        let (client, _) = spawn_service().await;

        let dataset = client.top_k(ObjectKind::Book, 2).await.unwrap();

        let ids: Vec<&str> = dataset.iter().map(|e| e.identifier.as_str()).collect();
        // "1" and "4" tie at 4.3; the later one comes first
        assert_eq!(ids, vec!["4", "1"]);
    }

    #[tokio::test]
    async fn test_top_k_on_empty_catalog() {
        let (client, _) = spawn_service().await;

        let dataset = client.top_k(ObjectKind::Author, 5).await.unwrap();
        assert!(dataset.is_empty());
    }

    // ============================================================
    // RECORD TESTS
    // ============================================================

    #[tokio::test]
    async fn test_get_record() {
        let (client, _) = spawn_service().await;

        let record = client.get(ObjectKind::Book, "1").await.unwrap();
        assert_eq!(record.get("title"), Some(&json!("Dune")));
    }

    #[tokio::test]
    async fn test_get_missing_record_is_service_error() {
        let (client, _) = spawn_service().await;

        match client.get(ObjectKind::Book, "77").await {
            Err(CatalogError::Service { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "GET error: Book with id 77 is not found");
            }
            other => panic!("expected Service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_server_error_page_is_service_error() {
        let (client, _) = spawn_service().await;

        let result = client.get(ObjectKind::Book, "crash").await;
        assert!(matches!(result, Err(CatalogError::Service { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_delete_record() {
        let (client, seen) = spawn_service().await;

        let reply = client.delete(ObjectKind::Book, "5").await.unwrap();

        assert!(reply.is_success());
        assert_eq!(reply.message(), "DELETE success: Book with id 5 is deleted");
        assert_eq!(seen.lock().unwrap().last().unwrap(), "DELETE /api/book id=5");
    }

    #[tokio::test]
    async fn test_update_omits_identifier() {
        let (client, seen) = spawn_service().await;
        let record = book("5").with("rating", "4.0").unwrap();

        let reply = client.update("5", &record).await.unwrap();

        assert!(reply.is_success());
        let entry = seen.lock().unwrap().last().unwrap().clone();
        assert!(entry.starts_with("PUT /api/book id=5 "));
        assert!(!entry.contains("book_id"));
        assert!(entry.contains("\"rating\":\"4.0\""));
    }

    #[tokio::test]
    async fn test_create_requires_identifier() {
        let (client, seen) = spawn_service().await;
        let record = Record::new(ObjectKind::Book).with("title", "Anonymous").unwrap();

        let result = client.create(&record).await;

        assert!(matches!(result, Err(CatalogError::MissingIdentifier(ObjectKind::Book))));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_reports_service_rejection() {
        let (client, _) = spawn_service().await;

        let reply = client.create(&book("1")).await.unwrap();

        assert_eq!(reply.status, 400);
        assert!(!reply.is_success());
        assert!(reply.message().contains("already exists"));
    }

    #[tokio::test]
    async fn test_create_many_rejects_mixed_kinds() {
        let (client, _) = spawn_service().await;
        let author = Record::new(ObjectKind::Author).with("author_id", "1").unwrap();

        let result = client.create_many(ObjectKind::Book, &[book("1"), author]).await;
        assert!(matches!(result, Err(CatalogError::KindMismatch { .. })));
    }

    #[tokio::test]
    async fn test_scrape_passes_url() {
        let (client, seen) = spawn_service().await;

        let reply = client.scrape("book/show/3735293-clean-code").await.unwrap();

        assert!(reply.is_success());
        assert_eq!(
            seen.lock().unwrap().last().unwrap(),
            "POST /api/scrape attr=book/show/3735293-clean-code"
        );
    }

    // ============================================================
    // PENDING BATCH TESTS
    // ============================================================

    #[tokio::test]
    async fn test_flush_empties_batch() {
        let (client, seen) = spawn_service().await;
        let mut batch = PendingBatch::new(ObjectKind::Book);
        batch.append(book("10")).unwrap();
        batch.append(book("11")).unwrap();

        let reply = client.flush(&mut batch).await.unwrap();

        assert!(reply.is_success());
        assert!(batch.is_empty());
        assert_eq!(seen.lock().unwrap().last().unwrap(), "POST /api/books 2");
    }

    #[tokio::test]
    async fn test_flush_keeps_batch_on_transport_failure() {
        let client = unreachable_client().await;
        let mut batch = PendingBatch::new(ObjectKind::Book);
        batch.append(book("10")).unwrap();

        let result = client.flush(&mut batch).await;

        assert!(matches!(result, Err(CatalogError::Network(_))));
        assert_eq!(batch.len(), 1);
    }

    // ============================================================
    // PROTOCOL / SEQUENCER TESTS
    // ============================================================

    #[test]
    fn test_reply_message_formatting() {
        let reply = ServiceReply {
            status: 200,
            body: json!({"PUT success": "Book with id 1 is updated"}),
        };
        assert_eq!(reply.message(), "PUT success: Book with id 1 is updated");
        assert_eq!(describe_body(&json!("plain")), "plain");
    }

    #[test]
    fn test_sequencer_discards_overtaken_tickets() {
        let sequencer = RequestSequencer::new();

        let first = sequencer.issue();
        assert!(sequencer.is_current(first));

        let second = sequencer.issue();
        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }
}
