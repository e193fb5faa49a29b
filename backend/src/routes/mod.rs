//! Page-level data assembly.
//!
//! Each module builds the DTO for one dashboard page from a loaded
//! [`Dataset`](crate::models::Dataset). Individual widgets are wrapped in
//! [`WidgetResult`] so an empty selection or a missing column only affects
//! the widget that needs it.

use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;

pub mod distribution;
pub mod landing;
pub mod statistics;
pub mod visualization;

/// Render state of a single widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WidgetResult<T> {
    Ready { data: T },
    /// The selection left nothing to show.
    Empty,
    /// The data this widget needs is not available.
    Unavailable { message: String },
}

impl<T> WidgetResult<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, WidgetResult::Ready { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            WidgetResult::Ready { data } => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WidgetResult<U> {
        match self {
            WidgetResult::Ready { data } => WidgetResult::Ready { data: f(data) },
            WidgetResult::Empty => WidgetResult::Empty,
            WidgetResult::Unavailable { message } => WidgetResult::Unavailable { message },
        }
    }
}

impl<T> From<PipelineResult<T>> for WidgetResult<T> {
    fn from(result: PipelineResult<T>) -> Self {
        match result {
            Ok(data) => WidgetResult::Ready { data },
            Err(e) if e.is_empty_state() => {
                log::debug!("Widget has nothing to show: {}", e);
                WidgetResult::Empty
            }
            Err(e) => {
                log::warn!("Widget unavailable: {}", e);
                WidgetResult::Unavailable {
                    message: e.to_string(),
                }
            }
        }
    }
}
