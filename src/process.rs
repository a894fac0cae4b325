//! Blocking launch of an interactive child process: feed it lines on stdin,
//! collect stdout/stderr, and classify how it exited.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

/// How an interactive process finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exit code 0; the full captured stdout.
    Success(String),
    /// Exit code 1 with nothing on stderr (the user dismissed the dialog).
    Cancelled,
    /// Exit code 1 with diagnostics on stderr.
    DialogError(String),
}

/// The process could not be run, or exited in a way that means it is broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchError {
    pub program: String,
    pub message: String,
}

impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.program, self.message)
    }
}

impl std::error::Error for LaunchError {}

/// Spawns `program`, writes each of `input` followed by `\n` to its stdin,
/// closes stdin, and waits for it to exit while capturing stdout and stderr.
///
/// The child is always waited on, even if writing its input fails partway.
pub fn run_interactive<S, I>(program: &str, args: &[S], input: I) -> Result<Outcome, LaunchError>
where
    S: AsRef<str>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let launch_err = |message: String| LaunchError {
        program: program.to_string(),
        message,
    };

    let mut payload = String::new();
    for line in input {
        payload.push_str(line.as_ref());
        payload.push('\n');
    }

    let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
    debug!(program, ?args, "launching interactive process");
    let mut child = Command::new(program)
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| launch_err(e.to_string()))?;

    let stdin = child.stdin.take();
    // stdin is fed from its own thread so a child that writes a lot before
    // draining its input cannot deadlock against us.
    let writer = thread::spawn(move || -> io::Result<()> {
        let Some(mut stdin) = stdin else {
            return Ok(());
        };
        stdin.write_all(payload.as_bytes())?;
        stdin.flush()
        // dropping stdin closes the pipe
    });

    let output = child.wait_with_output();
    let write_result = writer
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
    let output = output.map_err(|e| launch_err(format!("waiting for process: {e}")))?;

    match write_result {
        Ok(()) => {}
        // The child may legitimately exit before reading all of its input.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!(program, "child closed stdin early");
        }
        Err(e) => {
            warn!(program, error = %e, "writing process input failed");
            return Err(launch_err(format!("writing input: {e}")));
        }
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let code = output.status.code();
    debug!(program, ?code, "interactive process exited");

    match code {
        Some(0) => Ok(Outcome::Success(stdout)),
        Some(1) if stderr.trim().is_empty() => Ok(Outcome::Cancelled),
        Some(1) => Ok(Outcome::DialogError(stderr.trim().to_string())),
        _ => Err(launch_err(format!(
            "exited with {}{}",
            output.status,
            if stderr.trim().is_empty() {
                String::new()
            } else {
                format!(": {}", stderr.trim())
            }
        ))),
    }
}
