//! OpenAPI description of the Bookshelf API.
//!
//! The document is assembled with `serde_json::json!` and served as-is; no
//! interactive UI is bundled. Point any OpenAPI viewer at
//! `/api-docs/openapi.json`.

#![allow(clippy::unused_async)]

use axum::Json;
use serde_json::{json, Value};

/// Serve the OpenAPI document.
///
/// # Endpoint
///
/// ```text
/// GET /api-docs/openapi.json
/// ```
pub async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

/// Build the OpenAPI 3.0 document for every `/api` route.
#[must_use]
#[allow(clippy::too_many_lines)] // One literal document, long but flat
pub fn openapi_document() -> Value {
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Book ID",
        "schema": {"type": "string"}
    });
    let error = |description: &str| {
        json!({
            "description": description,
            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Error"}}}
        })
    };
    let book = |description: &str| {
        json!({
            "description": description,
            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Book"}}}
        })
    };
    let payload = |schema: &str| {
        json!({
            "required": true,
            "content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/{schema}")}}}
        })
    };

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Bookshelf API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "A simple CRUD API over an in-memory collection of books.",
            "license": {"name": "MIT OR Apache-2.0"}
        },
        "servers": [{"url": "/api"}],
        "tags": [{"name": "books"}],
        "paths": {
            "/books/": {
                "get": {
                    "tags": ["books"],
                    "summary": "Get all books",
                    "description": "Get list of books with optional pagination",
                    "operationId": "listBooks",
                    "parameters": [
                        {
                            "name": "page",
                            "in": "query",
                            "required": false,
                            "description": "Page number (default 1)",
                            "schema": {"type": "integer", "minimum": 1}
                        },
                        {
                            "name": "limit",
                            "in": "query",
                            "required": false,
                            "description": "Limit per page (default 50)",
                            "schema": {"type": "integer", "minimum": 1}
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "One page of books",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/BookPage"}}}
                        }
                    }
                },
                "post": {
                    "tags": ["books"],
                    "summary": "Create a new book",
                    "operationId": "createBook",
                    "requestBody": payload("NewBook"),
                    "responses": {
                        "201": book("Created book with its assigned id"),
                        "400": error("Missing field or malformed body")
                    }
                }
            },
            "/books/{id}": {
                "parameters": [id_param],
                "get": {
                    "tags": ["books"],
                    "summary": "Get a book by ID",
                    "operationId": "getBook",
                    "responses": {
                        "200": book("The book"),
                        "404": error("Unknown id")
                    }
                },
                "patch": {
                    "tags": ["books"],
                    "summary": "Partially update a book",
                    "description": "Only non-empty strings and non-zero years are applied.",
                    "operationId": "updateBook",
                    "requestBody": payload("BookPatch"),
                    "responses": {
                        "200": book("The merged book"),
                        "400": error("Malformed body"),
                        "404": error("Unknown id")
                    }
                },
                "put": {
                    "tags": ["books"],
                    "summary": "Replace a book (PUT)",
                    "operationId": "replaceBook",
                    "requestBody": payload("NewBook"),
                    "responses": {
                        "200": book("The replaced book"),
                        "400": error("Missing field or malformed body"),
                        "404": error("Unknown id")
                    }
                },
                "delete": {
                    "tags": ["books"],
                    "summary": "Delete a book by ID",
                    "operationId": "deleteBook",
                    "responses": {
                        "204": {"description": "No Content"},
                        "404": error("Unknown id")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "required": ["id", "title", "author"],
                    "properties": {
                        "id": {"type": "string"},
                        "title": {"type": "string"},
                        "author": {"type": "string"},
                        "year": {"type": "integer", "format": "int64", "description": "Omitted when unset"}
                    }
                },
                "NewBook": {
                    "type": "object",
                    "required": ["title", "author"],
                    "properties": {
                        "title": {"type": "string", "minLength": 1},
                        "author": {"type": "string", "minLength": 1},
                        "year": {"type": "integer", "format": "int64"}
                    }
                },
                "BookPatch": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string"},
                        "author": {"type": "string"},
                        "year": {"type": "integer", "format": "int64"}
                    }
                },
                "BookPage": {
                    "type": "object",
                    "required": ["data", "page", "limit", "total"],
                    "properties": {
                        "data": {"type": "array", "items": {"$ref": "#/components/schemas/Book"}},
                        "page": {"type": "integer"},
                        "limit": {"type": "integer"},
                        "total": {"type": "integer"}
                    }
                },
                "Error": {
                    "type": "object",
                    "required": ["error"],
                    "properties": {"error": {"type": "string"}}
                }
            }
        }
    })
}
