//! Text rendering of the rating widget for terminals and logs.

use edushare_core::{
    HeadlessDocument, Rating, RatingDocument, RatingWidget, WidgetConfig, RATING_SCALE,
};

pub const FILLED: char = '★';
pub const EMPTY: char = '☆';

/// A row of `RATING_SCALE` stars with the first `filled` drawn filled.
pub fn star_row(filled: usize) -> String {
    (0..usize::from(RATING_SCALE))
        .map(|i| if i < filled { FILLED } else { EMPTY })
        .collect()
}

/// Stars for an average rating, rounded to the nearest point.
pub fn average_row(average: Option<f64>) -> String {
    let filled = average
        .map(|a| a.round().clamp(0.0, f64::from(RATING_SCALE)) as usize)
        .unwrap_or(0);
    star_row(filled)
}

/// Row as the document shows it, read from the symbols' filled class.
pub fn document_row(doc: &HeadlessDocument, widget: &RatingWidget<HeadlessDocument>) -> String {
    let filled_class = &widget.config().filled_class;
    widget
        .symbols()
        .iter()
        .map(|s| if doc.has_class(*s.element(), filled_class) { FILLED } else { EMPTY })
        .collect()
}

/// Outcome of a preview run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Stars as rendered in the document.
    pub row: String,
    /// Backing field value (empty until a selection is made).
    pub field_value: String,
    pub value: u8,
}

/// Mount a widget on a fresh headless page and replay `selections` on it.
///
/// Positions outside the scale are skipped, like clicks that miss the widget.
pub fn run(config: &WidgetConfig, initial: Option<&str>, selections: &[i64]) -> Option<Preview> {
    let mut doc = HeadlessDocument::new();
    doc.add_container(&config.container_id, &config.initial_attribute, initial);
    doc.add_field(&config.field_id, "");

    let mut widget = RatingWidget::mount(&mut doc, config.clone())?;
    for &position in selections {
        let on_scale = u8::try_from(position)
            .ok()
            .and_then(|p| Rating::new(p).ok());
        match on_scale {
            Some(rating) => {
                widget.select(&mut doc, rating.get());
            }
            None => log::warn!("Ignoring position {} (expected 1..={})", position, RATING_SCALE),
        }
    }

    Some(Preview {
        row: document_row(&doc, &widget),
        field_value: doc.value(widget.field()),
        value: widget.value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_row() {
        assert_eq!(star_row(0), "☆☆☆☆☆☆☆☆☆☆");
        assert_eq!(star_row(3), "★★★☆☆☆☆☆☆☆");
        assert_eq!(star_row(10), "★★★★★★★★★★");
    }

    #[test]
    fn test_average_row() {
        assert_eq!(average_row(None), star_row(0));
        assert_eq!(average_row(Some(6.5)), star_row(7));
        assert_eq!(average_row(Some(6.49)), star_row(6));
    }

    #[test]
    fn test_run_initial_only() {
        let preview = run(&WidgetConfig::default(), Some("4"), &[]).unwrap();
        assert_eq!(preview.row, star_row(4));
        assert_eq!(preview.field_value, "");
        assert_eq!(preview.value, 4);
    }

    #[test]
    fn test_run_replays_selections() {
        let preview = run(&WidgetConfig::default(), None, &[9, 0, 2, 11, -1, 300]).unwrap();
        assert_eq!(preview.row, star_row(2));
        assert_eq!(preview.field_value, "2");
        assert_eq!(preview.value, 2);
    }
}
