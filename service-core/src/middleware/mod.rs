//! HTTP middleware shared by the services.

pub mod cors;
pub mod request_id;
