//! Dialog visibility

/// Whether a dialog is shown
///
/// Each page owns one of these per dialog. They do not exclude each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    /// Hidden
    #[default]
    Closed,
    /// Shown
    Open,
}

impl DialogState {
    /// Show the dialog
    pub fn open(&mut self) {
        *self = Self::Open;
    }

    /// Hide the dialog
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Whether the dialog is shown
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}
