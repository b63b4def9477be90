//! Command bodies, one per subcommand, behind the validated [`Invocation`].
//!
//! The pure sequences (`copy_cookie`, `resolve_cookie`) are free functions
//! over the adapter trait so tests can drive them with a fake kernel; the
//! fork boundaries live in [`crate::helper`].

use std::ffi::CString;

use crate::cookie::{Cookie, CookieOps};
use crate::error::{Error, Result};
use crate::helper;
use crate::types::{Invocation, Scope, TaskId};

pub fn run(ops: &dyn CookieOps, invocation: Invocation) -> Result<()> {
    match invocation {
        Invocation::Get { source } => {
            let cookie = ops.get(source)?;
            if cookie == 0 {
                return Err(Error::NoCookie(source));
            }
            println!("task {source} core scheduling cookie is 0x{cookie:x}");
            Ok(())
        }
        Invocation::Create { source, scope } => ops.create(source, scope),
        Invocation::Copy {
            source,
            dest,
            scope,
        } => helper::run_in_helper("cookie-transfer helper", || {
            copy_cookie(ops, source, dest, scope)
        })
        .map_err(|err| match err {
            Error::HelperFailed { status, .. } => Error::CopyFailed {
                source_task: source,
                dest,
                status,
            },
            other => other,
        }),
        Invocation::Exec { source, argv } => {
            helper::spawn_detached("exec helper", move || {
                exec_under_cookie(ops, source, &argv)
            })
        }
    }
}

/// Pull then push, in that order, short-circuiting on the pull. Runs
/// inside a helper child for `copy` so the adopted cookie lands in a
/// throwaway task slot.
pub fn copy_cookie(
    ops: &dyn CookieOps,
    source: TaskId,
    dest: TaskId,
    scope: Scope,
) -> Result<()> {
    ops.pull_from(source)?;
    ops.push_to(dest, scope)
}

/// Give the calling task the cookie `exec` should run under: adopt the
/// source's if one was named, otherwise mint a fresh one for this thread
/// group. Returns the resulting cookie for reporting.
pub fn resolve_cookie(ops: &dyn CookieOps, source: Option<TaskId>) -> Result<Cookie> {
    match source {
        Some(task) => ops.pull_from(task)?,
        None => ops.create(TaskId::CURRENT, Scope::ThreadGroup)?,
    }
    ops.get(TaskId::CURRENT)
}

/// Child side of `exec`. The cookie must be resolved and reported before
/// the image replacement: afterwards this process identity is gone.
/// Returns only on failure.
fn exec_under_cookie(ops: &dyn CookieOps, source: Option<TaskId>, argv: &[String]) -> Error {
    let cookie = match resolve_cookie(ops, source) {
        Ok(cookie) => cookie,
        Err(err) => return err,
    };
    eprintln!(
        "spawned pid {} with core scheduling cookie 0x{cookie:x}",
        std::process::id()
    );

    let program = argv[0].clone();
    let cstrings: std::result::Result<Vec<CString>, _> =
        argv.iter().map(|arg| CString::new(arg.as_str())).collect();
    let cstrings = match cstrings {
        Ok(cstrings) => cstrings,
        Err(_) => {
            return Error::ExecFailed {
                program,
                errno: nix::errno::Errno::EINVAL,
            }
        }
    };

    let errno = match nix::unistd::execvp(&cstrings[0], &cstrings) {
        Ok(infallible) => match infallible {},
        Err(errno) => errno,
    };
    Error::ExecFailed { program, errno }
}
