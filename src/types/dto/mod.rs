// API payloads - request and response bodies
pub mod auth;
pub mod calls;
pub mod common;
pub mod contacts;
pub mod users;
