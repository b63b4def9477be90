//! Operand parsing and the precondition checks that gate dispatch.
//!
//! clap hands over raw strings; everything semantic happens here so the
//! rules stay testable without a terminal.

use crate::error::{Error, Result};
use crate::types::{CommandKind, Invocation, Scope, TaskId};

/// Operands as they come off the command line, before any semantic checks.
#[derive(Debug, Default)]
pub struct RawArgs {
    pub source: Option<String>,
    pub dest: Option<String>,
    pub scope: Option<String>,
    pub argv: Vec<String>,
}

/// Parse a task id: base-10, optional explicit sign, nothing trailing.
/// Negative values get their own message since they are well-formed numbers
/// that can never name a task.
pub fn parse_task_id(input: &str) -> Result<TaskId> {
    let value: i64 = input
        .parse()
        .map_err(|_| Error::BadTaskId(input.to_string()))?;
    if value < 0 {
        return Err(Error::NegativeTaskId(value));
    }
    if value > libc::pid_t::MAX as i64 {
        return Err(Error::BadTaskId(input.to_string()));
    }
    Ok(TaskId(value as libc::pid_t))
}

/// Total mapping from the scope keywords to [`Scope`].
pub fn parse_scope(input: &str) -> Result<Scope> {
    match input {
        "pid" => Ok(Scope::Task),
        "tgid" => Ok(Scope::ThreadGroup),
        "pgid" => Ok(Scope::ProcessGroup),
        other => Err(Error::BadScope(other.to_string())),
    }
}

/// Check the per-command preconditions and build the [`Invocation`] that
/// dispatch runs. This is the only constructor of `Invocation`.
///
/// Get and Create need a source; Copy needs a source and a destination
/// (checked in that order, so a copy with neither reports the source
/// first); Exec needs a program and takes the source optionally. A task id
/// of zero counts as not supplied.
pub fn validate(cmd: CommandKind, raw: RawArgs) -> Result<Invocation> {
    let source = raw.source.as_deref().map(parse_task_id).transpose()?;
    let dest = raw.dest.as_deref().map(parse_task_id).transpose()?;
    let scope = raw
        .scope
        .as_deref()
        .map(parse_scope)
        .transpose()?
        .unwrap_or_default();

    let source = source.filter(|task| !task.is_unset());
    let dest = dest.filter(|task| !task.is_unset());

    match cmd {
        CommandKind::Get => Ok(Invocation::Get {
            source: source.ok_or(Error::MissingSource)?,
        }),
        CommandKind::Create => Ok(Invocation::Create {
            source: source.ok_or(Error::MissingSource)?,
            scope,
        }),
        CommandKind::Copy => {
            let source = source.ok_or(Error::MissingSource)?;
            let dest = dest.ok_or(Error::MissingDest)?;
            Ok(Invocation::Copy {
                source,
                dest,
                scope,
            })
        }
        CommandKind::Exec => {
            if raw.argv.is_empty() {
                return Err(Error::MissingProgram);
            }
            Ok(Invocation::Exec {
                source,
                argv: raw.argv,
            })
        }
    }
}
