use crate::error::PickerError;
use crate::menu::{Menu, Selection};

mod rofi;

pub use rofi::{RofiPicker, DEFAULT_PROGRAM};

/// An interactive selector that can show a menu's labels and return the
/// user's choice.
pub trait Picker {
    /// Shows `menu` and blocks until the user picks, types, or cancels.
    fn present(&self, menu: &Menu) -> Result<Selection, PickerError>;

    /// Shows a one-line message box. Used for fatal errors outside the
    /// navigation flow.
    fn show_error(&self, message: &str) -> Result<(), PickerError>;
}

impl<P: Picker + ?Sized> Picker for &P {
    fn present(&self, menu: &Menu) -> Result<Selection, PickerError> {
        (**self).present(menu)
    }

    fn show_error(&self, message: &str) -> Result<(), PickerError> {
        (**self).show_error(message)
    }
}

/// Turns raw picker stdout into a selection; blank output counts as a cancel.
pub fn selection_from_output(stdout: &str) -> Selection {
    let text = stdout.trim();
    if text.is_empty() {
        Selection::Cancelled
    } else {
        Selection::Text(text.to_string())
    }
}
