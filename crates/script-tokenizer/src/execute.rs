/// Execution of generated scripts

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::{debug, info, warn};

use crate::error::{Result, TokenizerError};

/// How a generated script finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Exited(i32),
    Signaled(i32),
    FailedToStart(String),
}

impl ScriptOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ScriptOutcome::Exited(0))
    }

    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ScriptOutcome::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ScriptOutcome::Signaled(signal);
            }
        }

        ScriptOutcome::FailedToStart(format!("unrecognized exit status {:?}", status))
    }
}

impl fmt::Display for ScriptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScriptOutcome::Exited(code) => write!(f, "exit code {}", code),
            ScriptOutcome::Signaled(signal) => write!(f, "signal {}", signal),
            ScriptOutcome::FailedToStart(reason) => write!(f, "launch failure: {}", reason),
        }
    }
}

/// Result of running one generated script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub path: PathBuf,
    pub outcome: ScriptOutcome,
}

/// Run a single generated file and wait for it to finish
///
/// The file is launched directly, so its permission bits and interpreter
/// line decide how it runs. An executable file the kernel cannot launch
/// (no `#!` line) is handed to `/bin/sh`, as a shell would do. Environment,
/// working directory and standard streams are inherited.
pub fn run_script(path: &Path) -> ScriptOutcome {
    info!("Running {}", path.display());
    match Command::new(path).status() {
        Ok(status) => ScriptOutcome::from_status(status),
        Err(e) if is_exec_format_error(&e) => {
            debug!("{} has no interpreter line, running it with /bin/sh", path.display());
            match Command::new("/bin/sh").arg(path).status() {
                Ok(status) => ScriptOutcome::from_status(status),
                Err(e) => ScriptOutcome::FailedToStart(e.to_string()),
            }
        }
        Err(e) => ScriptOutcome::FailedToStart(e.to_string()),
    }
}

#[cfg(unix)]
fn is_exec_format_error(e: &std::io::Error) -> bool {
    e.raw_os_error() == Some(libc::ENOEXEC)
}

#[cfg(not(unix))]
fn is_exec_format_error(_e: &std::io::Error) -> bool {
    false
}

/// Run generated files in order
///
/// With `break_on_error` the first unsuccessful script ends the run with
/// [`TokenizerError::ScriptFailed`]; otherwise failures are logged and the
/// remaining scripts still run.
pub fn run_all(paths: &[PathBuf], break_on_error: bool) -> Result<Vec<Execution>> {
    let mut executions = Vec::with_capacity(paths.len());

    for path in paths {
        let outcome = run_script(path);
        if !outcome.success() {
            if break_on_error {
                return Err(TokenizerError::ScriptFailed {
                    path: path.clone(),
                    outcome,
                });
            }
            warn!("Script {} failed with {}, continuing", path.display(), outcome);
        }
        executions.push(Execution {
            path: path.clone(),
            outcome,
        });
    }

    Ok(executions)
}
