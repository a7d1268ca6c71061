//! Document handlers
//!
//! Create goes through [`catch_data_errors`]; fetch and list return
//! [`ApiError`] and rely on the error middleware.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::Document;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::ApiError,
    middleware::{RequestContext, catch_data_errors},
    state::AppState,
};

/// Successful response envelope
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    /// Always `true`
    pub success: bool,
    /// Number of items, list responses only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Payload
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wrap a single payload
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data,
        }
    }
}

impl<T> DataResponse<Vec<T>> {
    /// Wrap a list payload with its length
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data,
        }
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Maximum number of documents, capped by `store.list_limit`
    pub limit: Option<usize>,
}

/// Create a document in a collection
///
/// A body that is not a JSON object is a bad request.
#[instrument(skip(state, ctx, payload))]
pub async fn create_document(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    ctx: RequestContext,
    payload: Result<Json<Document>, JsonRejection>,
) -> Response {
    let document = match payload {
        Ok(Json(document)) => document,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };

    catch_data_errors(&ctx, || async {
        let created = state.documents.create(&collection, &document).await?;
        Ok::<_, ApiError>((StatusCode::CREATED, Json(DataResponse::new(created))))
    })
    .await
}

/// Fetch a document by its identifier
#[instrument(skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<DataResponse<Document>>, ApiError> {
    let document = state.documents.find_by_id(&collection, &id).await?;
    Ok(Json(DataResponse::new(document)))
}

/// List documents of a collection
#[instrument(skip(state, query))]
pub async fn list_documents(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<Document>>>, ApiError> {
    let Query(query) = query?;
    let max = state.config.store.list_limit;
    let limit = query.limit.map_or(max, |limit| limit.min(max));

    let documents = state.documents.list(&collection, limit).await?;
    Ok(Json(DataResponse::list(documents)))
}
