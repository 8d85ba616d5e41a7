//! Widget configuration: element ids, attribute and class names.

use serde::{Deserialize, Serialize};

/// Where the rating widget finds its elements and how it marks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Id of the element the symbols are appended to.
    pub container_id: String,
    /// Id of the numeric form field holding the committed rating.
    pub field_id: String,
    /// Container attribute carrying the initial rating.
    pub initial_attribute: String,
    /// Tag used for each symbol element.
    pub symbol_tag: String,
    /// Class every symbol carries.
    pub symbol_class: String,
    /// Class toggled on filled symbols.
    pub filled_class: String,
    /// Text content of each symbol.
    pub glyph: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            container_id: "rating-widget".to_string(),
            field_id: "rating".to_string(),
            initial_attribute: "data-rating".to_string(),
            symbol_tag: "span".to_string(),
            symbol_class: "star".to_string(),
            filled_class: "filled".to_string(),
            glyph: "★".to_string(),
        }
    }
}
