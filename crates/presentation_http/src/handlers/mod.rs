//! HTTP request handlers

pub mod documents;
pub mod errors;
pub mod health;
