//! Star-rating input widget.
//!
//! This module provides a headless rating widget:
//! - Ten symbols bound to fixed positions 1..=10
//! - A backing form field kept in sync with the selection
//! - A host document trait so the same logic runs on a real DOM or in memory
//!
//! Rendering is up to the host. The widget only tracks state and toggles classes.

mod config;
mod document;
mod rating_input;
mod state;

pub use config::WidgetConfig;
pub use document::{HeadlessDocument, NodeId, RatingDocument};
pub use rating_input::{RatingWidget, Symbol};
pub use state::SymbolState;
