//! egui components for EduShare.
//!
//! - **RatingStars**: interactive 1–10 star input driving a [`edushare_core::RatingWidget`]
//! - **RatingBadge**: read-only display of an average rating

pub mod stars;

pub use stars::{
    position_at, star_points, star_rect, RatingBadge, RatingStars, RatingStarsResponse,
};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Star size in the input row
    pub const STAR: f32 = 24.0;
    /// Star size in read-only badges
    pub const BADGE_STAR: f32 = 12.0;
    /// Horizontal gap between stars
    pub const STAR_GAP: f32 = 2.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Filled star (amber)
    pub const STAR_FILLED: Color32 = Color32::from_rgb(245, 158, 11);
    /// Star under the pointer but not yet selected
    pub const STAR_HOVER: Color32 = Color32::from_rgb(252, 211, 77);
    /// Unfilled star outline
    pub const STAR_EMPTY: Color32 = Color32::from_rgb(209, 213, 219);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
}
