pub mod context;
pub mod erring;
