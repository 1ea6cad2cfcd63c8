use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::content::ContentService;

pub mod content;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct AppState {
    pub start_at: u64,
    pub content: Arc<ContentService>,
}

#[derive(Serialize, Deserialize)]
pub struct AppVersion {
    pub name: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub start_at: u64,
    pub content_dir: String,
}

pub async fn version(State(_): State<Arc<AppState>>) -> Json<AppVersion> {
    Json(AppVersion {
        name: APP_NAME.to_string(),
        version: APP_VERSION.to_string(),
    })
}

pub async fn healthz(State(app): State<Arc<AppState>>) -> Json<AppInfo> {
    Json(AppInfo {
        start_at: app.start_at,
        content_dir: app.content.base_dir().display().to_string(),
    })
}
