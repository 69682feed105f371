//! Batch operation endpoints
//!
//! Submission returns immediately with a tracking resource; pollers read
//! progress through the query endpoints until the operation is terminal.

use crate::core::batch::{BatchOperation, OperationStatus, SubmitOptions};
use crate::server::routes::errors;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Batch submission request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOperationRequest {
    /// Items to process, in order; duplicates allowed
    #[serde(default)]
    pub item_ids: Vec<String>,
    /// Operation kind: export, generate, review or finalize
    #[serde(default)]
    pub operation: String,
    /// Free-form configuration
    #[serde(default)]
    pub options: SubmitOptions,
}

/// Accepted submission response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    success: bool,
    operation_id: String,
    status: OperationStatus,
    message: String,
    tracking_url: String,
}

/// Single operation snapshot response
#[derive(Debug, Serialize)]
struct OperationResponse {
    success: bool,
    operation: BatchOperation,
}

/// Operation listing response
#[derive(Debug, Serialize)]
struct OperationListResponse {
    success: bool,
    operations: Vec<BatchOperation>,
}

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Maximum number of operations to return (capped at the configured limit)
    pub limit: Option<usize>,
}

/// Configure batch operation routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/operations")
            .route("", web::post().to(submit_operation))
            .route("", web::get().to(list_operations))
            .route("/{operation_id}", web::get().to(get_operation)),
    );
}

/// Submit a batch operation
///
/// Validates the request, creates the pending record and detaches
/// processing. Responds 202 before any item work starts.
pub async fn submit_operation(
    state: web::Data<AppState>,
    request: web::Json<SubmitOperationRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    let item_count = request.item_ids.len();
    info!(
        "Batch submission: {} operation with {} items",
        request.operation, item_count
    );

    match state
        .submitter
        .submit(request.item_ids, &request.operation, request.options)
        .await
    {
        Ok(receipt) => Ok(HttpResponse::Accepted().json(SubmitResponse {
            success: true,
            operation_id: receipt.operation_id,
            status: receipt.status,
            message: format!(
                "Batch {} operation accepted for {} item(s)",
                request.operation, item_count
            ),
            tracking_url: receipt.tracking_resource,
        })),
        Err(e) => {
            warn!("Batch submission rejected: {}", e);
            Ok(errors::service_error_to_response(e))
        }
    }
}

/// Snapshot of a single operation
pub async fn get_operation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let operation_id = path.into_inner();

    match state.status.get_operation(&operation_id).await {
        Ok(operation) => Ok(HttpResponse::Ok().json(OperationResponse {
            success: true,
            operation,
        })),
        Err(e) => Ok(errors::service_error_to_response(e)),
    }
}

/// Most recently started operations, newest first
pub async fn list_operations(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> ActixResult<HttpResponse> {
    let operations = state.status.list_recent(query.limit).await;

    Ok(HttpResponse::Ok().json(OperationListResponse {
        success: true,
        operations,
    }))
}
