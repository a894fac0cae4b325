use tracing::{debug, warn};

use super::{selection_from_output, Picker};
use crate::error::PickerError;
use crate::menu::{Menu, Selection};
use crate::process::{self, LaunchError, Outcome};

pub const DEFAULT_PROGRAM: &str = "rofi";

/// Drives `rofi -dmenu` (or anything speaking the same stdin/stdout/exit-code
/// protocol).
#[derive(Debug, Clone)]
pub struct RofiPicker {
    program: String,
    extra_args: Vec<String>,
}

impl RofiPicker {
    /// `extra_args` are appended verbatim to every invocation.
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args_for(&self, menu: &Menu) -> Vec<String> {
        let mut args = vec!["-dmenu".to_string()];
        if !menu.message.is_empty() {
            args.push("-mesg".to_string());
            args.push(menu.message.clone());
        }
        if !menu.prompt.is_empty() {
            args.push("-p".to_string());
            args.push(menu.prompt.clone());
        }
        if menu.markup_rows {
            args.push("-markup-rows".to_string());
        }
        if menu.select_row != 0 {
            args.push("-selected-row".to_string());
            args.push(menu.select_row.to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }

    fn launch_error(&self, err: LaunchError) -> PickerError {
        PickerError::Launch {
            program: self.program.clone(),
            message: err.message,
        }
    }
}

impl Default for RofiPicker {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, Vec::new())
    }
}

impl Picker for RofiPicker {
    fn present(&self, menu: &Menu) -> Result<Selection, PickerError> {
        let args = self.args_for(menu);
        let outcome = process::run_interactive(&self.program, &args, menu.labels())
            .map_err(|e| self.launch_error(e))?;

        match outcome {
            Outcome::Success(stdout) => {
                let selection = selection_from_output(&stdout);
                debug!(menu = %menu.name, ?selection, "picker returned");
                Ok(selection)
            }
            Outcome::Cancelled => {
                debug!(menu = %menu.name, "picker cancelled");
                Ok(Selection::Cancelled)
            }
            Outcome::DialogError(stderr) => Err(PickerError::Dialog(stderr)),
        }
    }

    fn show_error(&self, message: &str) -> Result<(), PickerError> {
        let args = ["-e", message];
        match process::run_interactive(&self.program, &args, std::iter::empty::<&str>()) {
            Ok(Outcome::DialogError(stderr)) => Err(PickerError::Dialog(stderr)),
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(program = %self.program, error = %e, "could not display error message");
                Err(self.launch_error(e))
            }
        }
    }
}
