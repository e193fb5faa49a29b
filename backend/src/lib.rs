//! # Philippine Food Prices Backend
//!
//! Analytics engine behind the WFP food price dashboard for the Philippines.
//!
//! This crate loads the WFP market price export (an HXL-tagged CSV), keeps it
//! in memory for the life of the process, and answers every dashboard
//! interaction by re-running one shared pipeline: filter by region and
//! commodity, then aggregate or resample. The dashboard pages are served as
//! JSON via Axum.
//!
//! ## Features
//!
//! - **Data Loading**: Parse the CSV export, tolerate partial schemas and blank cells
//! - **Filtering**: Tagged `All` / explicit selections over any category column
//! - **Aggregation**: Totals, means, medians, percentiles, grouped means and rankings
//! - **Resampling**: Daily, monthly, quarterly and yearly price trends
//! - **HTTP API**: RESTful endpoints for the dashboard front end
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Records, column identifiers, selections and the dataset
//! - [`source`]: Dataset sources (CSV file, in-memory) and the load-once cache
//! - [`services`]: The filter, aggregation and resampling pipeline
//! - [`routes`]: Page-level data assembly with per-widget states
//! - [`config`]: File and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod error;
pub mod models;

pub mod routes;

pub mod services;
pub mod source;

#[cfg(feature = "http-server")]
pub mod http;

pub use config::AppConfig;
pub use error::{PipelineError, PipelineResult};
