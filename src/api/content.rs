use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use axum_web::context::ReqContext;
use axum_web::erring::HTTPError;

use crate::content::ContentError;

use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct QueryContent {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
}

/// Lists a content type, or returns a single record when `id` is given.
pub async fn get(
    State(app): State<Arc<AppState>>,
    Extension(ctx): Extension<Arc<ReqContext>>,
    input: Result<Query<QueryContent>, QueryRejection>,
) -> Result<Response, HTTPError> {
    // a repeated `type` or `id` cannot be deserialized
    let Query(input) = match input {
        Ok(input) => input,
        Err(err) => {
            ctx.set("query_error", err.to_string().into()).await;
            return Err(ContentError::InvalidType(err.to_string()).into());
        }
    };
    let kind = input.kind.unwrap_or_default();

    match input.id.filter(|id| !id.is_empty()) {
        None => {
            ctx.set_kvs(vec![
                ("action", "list_content".into()),
                ("type", kind.clone().into()),
            ])
            .await;

            let records = app.content.list_by_type(&kind).await?;
            ctx.set("count", records.len().into()).await;
            Ok(Json(records).into_response())
        }
        Some(id) => {
            ctx.set_kvs(vec![
                ("action", "get_content".into()),
                ("type", kind.clone().into()),
                ("id", id.clone().into()),
            ])
            .await;

            let record = app.content.get_by_id(&kind, &id).await?;
            Ok(Json(record).into_response())
        }
    }
}

/// Cross-origin pre-flight: empty 200, headers come from the router layers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
