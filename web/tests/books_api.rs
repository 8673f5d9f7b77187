//! End-to-end tests for the books API, driven through `axum-test`.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use axum_test::TestServer;
use bookshelf_core::{Book, BookStore};
use bookshelf_testing::{properties, sample_payload, store_with_books, store_with_titles};
use bookshelf_web::{build_router, AppState};
use proptest::prelude::*;
use serde_json::{json, Value};

fn server_for(store: BookStore) -> TestServer {
    TestServer::new(build_router(AppState::new(store))).unwrap()
}

fn error_message(body: &Value) -> &str {
    body["error"].as_str().unwrap()
}

#[tokio::test]
async fn test_create_then_fetch() {
    let server = server_for(BookStore::new());

    let response = server.post("/api/books").json(&sample_payload()).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Book = response.json();
    assert!(!created.id.is_empty());
    assert_eq!(created.title, "T");
    assert_eq!(created.author, "A");
    assert_eq!(created.year, Some(2020));

    let fetched = server.get(&format!("/api/books/{}", created.id)).await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    assert_eq!(fetched.json::<Book>(), created);
}

#[tokio::test]
async fn test_create_with_trailing_slash() {
    let server = server_for(BookStore::new());

    let response = server
        .post("/api/books/")
        .json(&json!({"title": "Dune", "author": "Frank Herbert"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body.get("year").is_none());
}

#[tokio::test]
async fn test_create_requires_title() {
    let server = server_for(BookStore::new());

    let response = server
        .post("/api/books")
        .json(&json!({"title": "", "author": "A"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response.json()), "title is required");
}

#[tokio::test]
async fn test_create_requires_author() {
    let server = server_for(BookStore::new());

    let response = server.post("/api/books").json(&json!({"title": "T"})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response.json()), "author is required");
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let server = server_for(BookStore::new());

    let response = server
        .post("/api/books")
        .text("{not json")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response.json()), "invalid JSON body");
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let server = server_for(BookStore::new());

    let response = server
        .post("/api/books")
        .json(&json!({"id": "chosen", "title": "T", "author": "A", "extra": 1}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_ne!(response.json::<Book>().id, "chosen");
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let server = server_for(BookStore::new());

    let response = server.get("/api/books/does-not-exist").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(&response.json()), "book not found");
}

#[tokio::test]
async fn test_list_second_page_of_one() {
    let (store, books) = store_with_titles(&["first", "second", "third"]);
    let server = server_for(store);

    let response = server
        .get("/api/books")
        .add_query_param("limit", 1)
        .add_query_param("page", 2)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], books[1].id.as_str());
}

#[tokio::test]
async fn test_list_defaults_and_clamping() {
    let (store, _) = store_with_books(3);
    let server = server_for(store);

    let body: Value = server.get("/api/books").await.json();
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 50);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let body: Value = server.get("/api/books/?page=0&limit=abc").await.json();
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 50);

    let body: Value = server.get("/api/books?page=9&limit=2").await.json();
    assert_eq!(body["total"], 3);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_patch_keeps_untouched_fields() {
    let server = server_for(BookStore::new());
    let created: Book = server.post("/api/books").json(&sample_payload()).await.json();

    let response = server
        .patch(&format!("/api/books/{}", created.id))
        .json(&json!({"title": "New", "author": "", "year": 0}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Book = response.json();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "New");
    assert_eq!(updated.author, "A");
    assert_eq!(updated.year, Some(2020));
}

#[tokio::test]
async fn test_patch_missing_book_reported_before_bad_body() {
    let server = server_for(BookStore::new());

    let response = server
        .patch("/api/books/missing")
        .text("garbage")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(&response.json()), "book not found");
}

#[tokio::test]
async fn test_patch_bad_body_on_existing_book() {
    let (store, books) = store_with_books(1);
    let server = server_for(store);

    let response = server
        .patch(&format!("/api/books/{}", books[0].id))
        .text("garbage")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_validates_before_lookup() {
    let server = server_for(BookStore::new());

    let response = server
        .put("/api/books/missing")
        .json(&json!({"title": "", "author": "A"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response.json()), "title is required");

    let response = server.put("/api/books/missing").json(&sample_payload()).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_is_idempotent() {
    let (store, books) = store_with_books(1);
    let server = server_for(store);
    let path = format!("/api/books/{}", books[0].id);
    let payload = json!({"title": "Replaced", "author": "Someone"});

    let first: Book = server.put(&path).json(&payload).await.json();
    let second: Book = server.put(&path).json(&payload).await.json();

    assert_eq!(first, second);
    assert_eq!(first.id, books[0].id);
    assert_eq!(first.year, None);
    assert_eq!(server.get(&path).await.json::<Book>(), first);
}

#[tokio::test]
async fn test_delete_then_get() {
    let (store, books) = store_with_books(2);
    let server = server_for(store.clone());
    let path = format!("/api/books/{}", books[0].id);

    let response = server.delete(&path).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    assert_eq!(server.get(&path).await.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(server.delete(&path).await.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(store.len().unwrap(), 1);
}

#[tokio::test]
async fn test_correlation_id_echoed() {
    let server = server_for(BookStore::new());

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.headers().contains_key("x-correlation-id"));
}

#[tokio::test]
async fn test_undecodable_id_is_json_404() {
    let server = server_for(BookStore::new());

    let response = server.get("/api/books/%FF").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(&response.json()), "book not found");
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let server = server_for(BookStore::new());

    let response = server.delete("/api/books").await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_message(&response.json()), "cannot DELETE /api/books");

    let response = server.post("/api/books/some-id").json(&sample_payload()).await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_message(&response.json()), "cannot POST /api/books/some-id");
}

#[tokio::test]
async fn test_list_repeated_query_keys_use_first_value() {
    let (store, books) = store_with_books(3);
    let server = server_for(store);

    let body: Value = server.get("/api/books?page=2&limit=1&page=3").await.json();

    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], books[1].id.as_str());
}

#[tokio::test]
async fn test_year_beyond_32_bits() {
    let server = server_for(BookStore::new());

    let response = server
        .post("/api/books")
        .json(&json!({"title": "T", "author": "A", "year": 3_000_000_000_i64}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Book>().year, Some(3_000_000_000));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_created_books_round_trip(payload in properties::valid_new_book()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let server = server_for(BookStore::new());
            let response = server.post("/api/books").json(&payload).await;
            prop_assert_eq!(response.status_code(), StatusCode::CREATED);

            let created: Book = response.json();
            let fetched: Book = server.get(&format!("/api/books/{}", created.id)).await.json();
            prop_assert_eq!(&fetched, &created);
            prop_assert_eq!(&created.title, &payload.title);
            Ok(())
        })?;
    }

    #[test]
    fn prop_patch_only_touches_provided_fields(patch in properties::any_patch()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let server = server_for(BookStore::new());
            let created: Book = server.post("/api/books").json(&sample_payload()).await.json();

            let response = server
                .patch(&format!("/api/books/{}", created.id))
                .json(&patch)
                .await;
            prop_assert_eq!(response.status_code(), StatusCode::OK);

            let updated: Book = response.json();
            let expected_title = patch.title.clone().filter(|t| !t.is_empty()).unwrap_or(created.title);
            let expected_author = patch.author.clone().filter(|a| !a.is_empty()).unwrap_or(created.author);
            let expected_year = patch.year.filter(|y| *y != 0).or(created.year);
            prop_assert_eq!(updated.id, created.id);
            prop_assert_eq!(updated.title, expected_title);
            prop_assert_eq!(updated.author, expected_author);
            prop_assert_eq!(updated.year, expected_year);
            Ok(())
        })?;
    }
}
