//! The star-rating input widget.

use super::config::WidgetConfig;
use super::document::RatingDocument;
use super::state::SymbolState;
use crate::rating::{parse_initial, Rating, RATING_SCALE};

/// One of the widget's symbols, bound to a fixed position at construction.
#[derive(Debug, Clone)]
pub struct Symbol<E> {
    position: u8,
    element: E,
    state: SymbolState,
}

impl<E> Symbol<E> {
    /// Position on the scale (1-based).
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Handle to the symbol's element in the host document.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Current visual state.
    pub fn state(&self) -> SymbolState {
        self.state
    }
}

/// A mounted rating widget.
///
/// Owns handles to its symbol elements and the backing field, and is the only
/// thing that mutates their state. The number of filled symbols always equals
/// [`RatingWidget::value`].
#[derive(Debug, Clone)]
pub struct RatingWidget<D: RatingDocument> {
    config: WidgetConfig,
    field: D::Element,
    symbols: Vec<Symbol<D::Element>>,
    /// 0 until the first selection when mounted unrated.
    value: u8,
}

impl<D: RatingDocument> RatingWidget<D> {
    /// Mount the widget into `doc`.
    ///
    /// Looks up the container and backing field by id. If either is missing
    /// nothing is created and `None` is returned. The same holds when the host
    /// fails to create a symbol: the symbols appended so far are removed again.
    /// Otherwise ten symbols are appended to the container in ascending order,
    /// filled up to the container's initial rating. The backing field is left
    /// as it is.
    pub fn mount(doc: &mut D, config: WidgetConfig) -> Option<Self> {
        let container = doc.element_by_id(&config.container_id)?;
        let field = doc.element_by_id(&config.field_id)?;

        let initial = parse_initial(doc.attribute(&container, &config.initial_attribute).as_deref());

        let mut symbols: Vec<Symbol<D::Element>> = Vec::with_capacity(RATING_SCALE as usize);
        for position in 1..=RATING_SCALE {
            let Some(element) =
                doc.append_child(&container, &config.symbol_tag, &config.symbol_class, &config.glyph)
            else {
                log::warn!("Failed to create rating symbol {}", position);
                for symbol in &symbols {
                    doc.remove_child(&container, &symbol.element);
                }
                return None;
            };
            doc.set_attribute(&element, "data-value", &position.to_string());
            let state = SymbolState::for_position(position, initial);
            doc.set_class(&element, &config.filled_class, state.is_filled());
            symbols.push(Symbol {
                position,
                element,
                state,
            });
        }

        log::debug!(
            "Mounted rating widget '{}' with initial value {}",
            config.container_id,
            initial
        );

        Some(Self {
            config,
            field,
            symbols,
            value: initial,
        })
    }

    /// Select the symbol at `position`.
    ///
    /// Writes the position to the backing field and fills every symbol up to
    /// it, clearing the rest. Positions outside the scale are ignored.
    pub fn select(&mut self, doc: &mut D, position: u8) -> Option<Rating> {
        let rating = Rating::new(position).ok()?;

        doc.set_value(&self.field, &rating.to_string());
        for symbol in &mut self.symbols {
            symbol.state = SymbolState::for_position(symbol.position, rating.get());
            doc.set_class(&symbol.element, &self.config.filled_class, symbol.state.is_filled());
        }
        self.value = rating.get();

        log::debug!("Rating widget '{}' set to {}", self.config.container_id, rating);
        Some(rating)
    }

    /// Route an activation on `element` to the symbol it belongs to.
    ///
    /// Elements that are not one of this widget's symbols are ignored.
    pub fn activate(&mut self, doc: &mut D, element: &D::Element) -> Option<Rating> {
        let position = self
            .symbols
            .iter()
            .find(|s| &s.element == element)
            .map(|s| s.position)?;
        self.select(doc, position)
    }

    /// Current value: the last selection, or the initial value before any.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// The committed rating, `None` while still unrated.
    pub fn rating(&self) -> Option<Rating> {
        Rating::new(self.value).ok()
    }

    /// The symbols in ascending position order.
    pub fn symbols(&self) -> &[Symbol<D::Element>] {
        &self.symbols
    }

    /// Number of filled symbols.
    pub fn filled_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.state.is_filled()).count()
    }

    /// Handle to the backing field.
    pub fn field(&self) -> &D::Element {
        &self.field
    }

    /// The configuration the widget was mounted with.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }
}
