//! Heatmap CLI Library
//!
//! The owning-application side of the densification engine: configuration
//! loading, off-thread dispatch with stale-result suppression, and GeoJSON
//! file I/O.

pub mod config;
pub mod dispatch;
pub mod io;

pub use dispatch::{Dispatch, Dispatcher, PendingDispatch, Rendered};
