pub mod cors;
pub mod locale;
pub mod request_tracing;
