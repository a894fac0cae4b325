use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command as ProcessCommand, Stdio};

use tracing::debug;

use crate::error::CommandError;
use crate::menu::Command;

pub const NOT_FOUND_HINT: &str = "use \"./\" for local files or provide an absolute path";

/// Runs the command attached to a menu item.
pub trait Executor {
    /// Returns captured stdout on success.
    fn execute(&self, command: &Command) -> Result<String, CommandError>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, command: &Command) -> Result<String, CommandError> {
        (**self).execute(command)
    }
}

/// Executes commands as real child processes, resolved against `PATH`.
#[derive(Debug, Default, Clone)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SystemExecutor {
    fn execute(&self, command: &Command) -> Result<String, CommandError> {
        let path = resolve(&command.executable).ok_or_else(|| CommandError::NotFound {
            executable: command.executable.clone(),
            hint: NOT_FOUND_HINT.to_string(),
        })?;

        debug!(executable = %path.display(), args = ?command.args, "running command");
        let out = ProcessCommand::new(&path)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CommandError::Spawn {
                executable: command.executable.clone(),
                source,
            })?;

        if !out.status.success() {
            return Err(CommandError::Failed {
                executable: command.executable.clone(),
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

/// Finds `executable` the way a shell would: names containing a path
/// separator are taken as-is, bare names are searched in `PATH`. Only regular
/// files with an execute bit qualify.
pub fn resolve(executable: &str) -> Option<PathBuf> {
    if executable.is_empty() {
        return None;
    }
    let candidate = Path::new(executable);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(executable))
        .find(|p| is_executable(p))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
