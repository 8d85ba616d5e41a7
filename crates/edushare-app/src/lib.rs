//! EduShare Application
//!
//! The application shell: mounts the rating widget in the browser, hosts the
//! egui review panel and provides the native command line.

pub mod config;
pub mod preview;
pub mod ui;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod cli;

pub use config::AppConfig;
pub use ui::{render_ui, UiAction, UiState};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{mount_rating_widget, run_wasm, WebDocument};
