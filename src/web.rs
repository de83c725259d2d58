//! Web server for the inventory UI
//!
//! Thin JSON API over [`InventoryService`] plus a single bundled HTML page.
//! Handlers only translate HTTP to service calls and service results back
//! into status codes and user-facing messages.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::Product;
use crate::service::{InventoryService, Summary};

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: Arc<InventoryService>,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

type ApiReply<T> = (StatusCode, Json<ApiResponse<T>>);

fn reply<T>(status: StatusCode, data: T, message: Option<String>) -> ApiReply<T> {
    (
        status,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message,
            error: None,
        }),
    )
}

fn reply_error<T>(err: ServiceError) -> ApiReply<T> {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            message: None,
            error: Some(format!("Error: {}", err)),
        }),
    )
}

/// Everything the overview page renders
#[derive(Serialize)]
struct InventoryOverview {
    products: Vec<Product>,
    summary: Summary,
    low_stock: Vec<String>,
}

/// Raw create-form fields; numbers arrive as typed by the user
#[derive(Deserialize)]
struct NewProductForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    stock: String,
}

/// Raw update-form fields; absent or blank means "leave unchanged"
#[derive(Deserialize)]
struct UpdateProductForm {
    stock: Option<String>,
    price: Option<String>,
}

/// GET / - Serve the web UI (single HTML page)
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// GET /api/inventory
async fn inventory_handler(State(state): State<AppState>) -> ApiReply<InventoryOverview> {
    let service = &state.service;
    let overview = InventoryOverview {
        products: service.list(),
        summary: service.summary(),
        low_stock: service
            .low_stock()
            .into_iter()
            .map(|p| p.item_code)
            .collect(),
    };
    reply(StatusCode::OK, overview, None)
}

/// GET /api/products/{code}
async fn get_product_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiReply<Product> {
    match state.service.get(&code) {
        Ok(product) => reply(StatusCode::OK, product, None),
        Err(e) => reply_error(e),
    }
}

/// POST /api/products
async fn create_product_handler(
    State(state): State<AppState>,
    Json(form): Json<NewProductForm>,
) -> ApiReply<Product> {
    match state.service.create(&form.name, &form.price, &form.stock) {
        Ok(product) => {
            let message = format!("Product {} added successfully!", product.item_code);
            reply(StatusCode::CREATED, product, Some(message))
        }
        Err(e) => reply_error(e),
    }
}

/// POST /api/products/{code}
async fn update_product_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(form): Json<UpdateProductForm>,
) -> ApiReply<Product> {
    match state
        .service
        .update(&code, form.stock.as_deref(), form.price.as_deref())
    {
        Ok(product) => {
            let message = format!("Product {} updated successfully!", product.item_code);
            reply(StatusCode::OK, product, Some(message))
        }
        Err(e) => reply_error(e),
    }
}

/// DELETE /api/products/{code}
async fn delete_product_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiReply<Product> {
    match state.service.delete(&code) {
        Ok(product) => {
            let message = format!("Product {} deleted successfully!", product.item_code);
            reply(StatusCode::OK, product, Some(message))
        }
        Err(e) => reply_error(e),
    }
}

/// Build the web server router
pub fn create_router(service: Arc<InventoryService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/inventory", get(inventory_handler))
        .route("/api/products", post(create_product_handler))
        .route(
            "/api/products/{code}",
            get(get_product_handler)
                .post(update_product_handler)
                .delete(delete_product_handler),
        )
        .with_state(state)
}

/// Start the web server and run until Ctrl-C
pub async fn serve(service: Arc<InventoryService>, host: &str, port: u16) -> std::io::Result<()> {
    let app = create_router(service);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Web UI listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received, stopping web server"),
        Err(e) => {
            log::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
