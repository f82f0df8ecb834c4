//! serene-service
//!
//! Application services the host binds to its own transport: assessment
//! submission and history, gated chat, configuration, audit events, and the
//! tracing subscriber setup.

pub mod audit;
pub mod config;
pub mod error;
pub mod services;
pub mod telemetry;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use services::{ChatRequest, Services, SubmitAssessmentRequest};
