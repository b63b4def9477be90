//! Error types for coresched

use nix::errno::Errno;
use nix::sys::signal::Signal;
use thiserror::Error;

use crate::types::TaskId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse task id '{0}'")]
    BadTaskId(String),

    #[error("task id {0} cannot be negative")]
    NegativeTaskId(i64),

    #[error("'{0}' is not a valid type; must be one of pid/tgid/pgid")]
    BadScope(String),

    #[error("retrieving a core scheduling cookie requires a source task (-s)")]
    MissingSource,

    #[error("copying a core scheduling cookie requires a destination task (-d)")]
    MissingDest,

    #[error("exec requires a program to run")]
    MissingProgram,

    #[error("kernel rejected {action}: {errno}")]
    Kernel { action: &'static str, errno: Errno },

    #[error("task {0} doesn't have a core scheduling cookie")]
    NoCookie(TaskId),

    #[error("failed to fork {role}: {errno}")]
    ForkFailed { role: &'static str, errno: Errno },

    #[error("{role} exited with status {status}")]
    HelperFailed { role: &'static str, status: i32 },

    #[error("{role} terminated by signal {signal}")]
    HelperKilled { role: &'static str, signal: Signal },

    #[error("failed to wait for {role}: {errno}")]
    WaitFailed { role: &'static str, errno: Errno },

    // The field is named `source_task` rather than `source` because
    // thiserror treats a field named `source` as the error's source(),
    // which would require `TaskId: std::error::Error`.
    #[error("failed to copy core scheduling cookie from task {source_task} to task {dest}")]
    CopyFailed {
        source_task: TaskId,
        dest: TaskId,
        status: i32,
    },

    #[error("failed to execute '{program}': {errno}")]
    ExecFailed { program: String, errno: Errno },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit status for this error. Kernel rejections surface the
    /// raw errno unchanged; a failed copy propagates the helper child's
    /// status; "no cookie" is the distinguished status 1 so callers can
    /// tell "successfully determined: none" apart from usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Kernel { errno, .. } => *errno as i32,
            Error::CopyFailed { status, .. } => *status,
            Error::NoCookie(_) => 1,
            Error::ForkFailed { .. }
            | Error::HelperFailed { .. }
            | Error::HelperKilled { .. }
            | Error::WaitFailed { .. }
            | Error::ExecFailed { .. } => 1,
            // Parse and validation errors use the same status clap does.
            _ => 2,
        }
    }
}
