//! Symbol state definitions.

/// The visual state of a single rating symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolState {
    /// Position is above the current rating.
    #[default]
    Unfilled,
    /// Position is at or below the current rating.
    Filled,
}

impl SymbolState {
    /// State of the symbol at `position` when the widget holds `value`.
    pub fn for_position(position: u8, value: u8) -> Self {
        if position <= value {
            Self::Filled
        } else {
            Self::Unfilled
        }
    }

    /// Check if the symbol is drawn filled.
    pub fn is_filled(self) -> bool {
        matches!(self, Self::Filled)
    }
}
