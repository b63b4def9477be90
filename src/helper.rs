//! Fork-based process orchestration.
//!
//! A cookie PULL lands in whichever task performs it, so moving a cookie
//! between two other tasks takes a throwaway process context. These two
//! entry points are the only places the tool forks: [`run_in_helper`]
//! waits for its child and translates the exit status, while
//! [`spawn_detached`] returns as soon as the child exists. The detached
//! parent never learns whether the exec'd program succeeds — that is the
//! intended launcher semantic (the caller's shell tracks the new program
//! by pid), not a missing wait.

use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult};
use tracing::debug;

use crate::error::{Error, Result};

/// Fork, run `action` in the child, wait, and translate the child's exit
/// status. The child terminates through `_exit` and never returns here;
/// on failure it prints its own error before exiting so the parent only
/// has to report the overall outcome.
pub fn run_in_helper<F>(role: &'static str, action: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    // Single-threaded process, no async runtime: forking is sound.
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            let status = match action() {
                Ok(()) => 0,
                Err(err) => {
                    eprintln!("coresched: {err}");
                    err.exit_code()
                }
            };
            // _exit skips atexit handlers and the parent's stdio state.
            unsafe { libc::_exit(status) }
        }
        Ok(ForkResult::Parent { child }) => {
            debug!(role, child = child.as_raw(), "helper forked");
            match waitpid(child, None) {
                Ok(WaitStatus::Exited(_, 0)) => Ok(()),
                Ok(WaitStatus::Exited(_, status)) => Err(Error::HelperFailed { role, status }),
                Ok(WaitStatus::Signaled(_, signal, _)) => Err(Error::HelperKilled { role, signal }),
                Ok(_) => Err(Error::HelperFailed { role, status: 1 }),
                Err(errno) => Err(Error::WaitFailed { role, errno }),
            }
        }
        Err(errno) => Err(Error::ForkFailed { role, errno }),
    }
}

/// Fork and let the child become something else. `action` returns only on
/// failure (its success path replaces the process image); the parent comes
/// back immediately without waiting.
pub fn spawn_detached<F>(role: &'static str, action: F) -> Result<()>
where
    F: FnOnce() -> Error,
{
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            let err = action();
            eprintln!("coresched: {err}");
            unsafe { libc::_exit(err.exit_code()) }
        }
        Ok(ForkResult::Parent { child }) => {
            debug!(role, child = child.as_raw(), "child launched");
            Ok(())
        }
        Err(errno) => Err(Error::ForkFailed { role, errno }),
    }
}
