pub mod api;
pub mod conf;
pub mod content;
pub mod router;
