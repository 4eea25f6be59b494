//! Integration tests driving the router in-process

pub mod bulk;
pub mod fixture;
pub mod route_get;
pub mod route_post;
