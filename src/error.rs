use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failures while locating or parsing the menu file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {0} does not exist")]
    NotFound(PathBuf),

    #[error("config path {0} is a directory")]
    IsDirectory(PathBuf),

    #[error("reading config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("config {0} defines no menus under `app`")]
    Empty(PathBuf),
}

/// Failures reported by the picker process.
#[derive(Error, Debug)]
pub enum PickerError {
    /// The picker could not be started, or died with an unexpected exit code.
    /// Nothing downstream can recover from this.
    #[error("picker `{program}` failed: {message}")]
    Launch { program: String, message: String },

    /// Exit code 1 with diagnostics on stderr.
    #[error("picker reported an error: {0}")]
    Dialog(String),
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{executable}: executable file not found\n{hint}")]
    NotFound { executable: String, hint: String },

    #[error("{executable}: failed to start: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{executable}: {status}{}", stderr_suffix(.stderr))]
    Failed {
        executable: String,
        status: ExitStatus,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Terminal errors of a navigation session.
#[derive(Error, Debug)]
pub enum NavError {
    #[error(transparent)]
    Picker(#[from] PickerError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("confirmation dialog failed: {0}")]
    Confirmation(Box<NavError>),

    #[error("menu `{menu}` is nested {depth} levels deep; check for a cyclic `menu` reference")]
    DepthExceeded { menu: String, depth: usize },
}

impl NavError {
    /// True when the picker binary itself is unusable, so it cannot be used to
    /// display this error either.
    pub fn is_picker_launch(&self) -> bool {
        match self {
            NavError::Picker(PickerError::Launch { .. }) => true,
            NavError::Confirmation(inner) => inner.is_picker_launch(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_hint() {
        let err = CommandError::NotFound {
            executable: "backup.sh".to_string(),
            hint: "use \"./\" for local files or provide an absolute path".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("backup.sh: executable file not found"));
        assert!(msg.contains("use \"./\""));
    }

    #[test]
    fn launch_inside_confirmation_is_still_a_launch_failure() {
        let err = NavError::Confirmation(Box::new(NavError::Picker(PickerError::Launch {
            program: "rofi".to_string(),
            message: "No such file or directory".to_string(),
        })));
        assert!(err.is_picker_launch());
    }

    #[test]
    fn dialog_error_can_be_shown_by_the_picker() {
        let err = NavError::from(PickerError::Dialog("bad theme".to_string()));
        assert!(!err.is_picker_launch());
    }
}
