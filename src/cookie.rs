//! Thin wrapper over the `prctl(PR_SCHED_CORE, ...)` control interface.

use nix::errno::Errno;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Scope, TaskId};

/// Cookie value exactly as the kernel reports it. Zero means no cookie
/// assigned; the value is never interpreted beyond that.
pub type Cookie = u64;

/// The kernel's cookie machinery as an injected capability, so command
/// bodies can run against a scripted fake that records calls.
pub trait CookieOps {
    /// Read `task`'s cookie. GET is defined per-task, so this queries at
    /// Task scope regardless of any scope the user asked for.
    fn get(&self, task: TaskId) -> Result<Cookie>;

    /// Mint a new unique cookie for every task in `scope` around `task`.
    fn create(&self, task: TaskId, scope: Scope) -> Result<()>;

    /// Adopt `task`'s cookie into the calling task's own slot. Must run
    /// inside the process whose cookie should change.
    fn pull_from(&self, task: TaskId) -> Result<()>;

    /// Propagate the calling task's cookie onto `task` and its `scope`.
    fn push_to(&self, task: TaskId, scope: Scope) -> Result<()>;
}

/// The real kernel interface.
pub struct PrctlCookie;

impl PrctlCookie {
    fn sched_core(
        &self,
        action: &'static str,
        cmd: libc::c_int,
        task: TaskId,
        scope: libc::c_ulong,
        arg: *mut Cookie,
    ) -> Result<()> {
        let rc = unsafe {
            libc::prctl(
                libc::PR_SCHED_CORE,
                cmd as libc::c_ulong,
                task.0 as libc::c_ulong,
                scope,
                arg,
            )
        };
        if rc == -1 {
            let errno = Errno::last();
            debug!(action, task = task.0, code = errno as i32, "prctl failed");
            return Err(Error::Kernel { action, errno });
        }
        debug!(action, task = task.0, "prctl ok");
        Ok(())
    }
}

impl CookieOps for PrctlCookie {
    fn get(&self, task: TaskId) -> Result<Cookie> {
        let mut cookie: Cookie = 0;
        self.sched_core(
            "get",
            libc::PR_SCHED_CORE_GET,
            task,
            libc::PR_SCHED_CORE_SCOPE_THREAD as libc::c_ulong,
            &mut cookie,
        )?;
        Ok(cookie)
    }

    fn create(&self, task: TaskId, scope: Scope) -> Result<()> {
        self.sched_core(
            "create",
            libc::PR_SCHED_CORE_CREATE,
            task,
            scope.as_prctl(),
            std::ptr::null_mut(),
        )
    }

    fn pull_from(&self, task: TaskId) -> Result<()> {
        self.sched_core(
            "pull",
            libc::PR_SCHED_CORE_SHARE_FROM,
            task,
            libc::PR_SCHED_CORE_SCOPE_THREAD as libc::c_ulong,
            std::ptr::null_mut(),
        )
    }

    fn push_to(&self, task: TaskId, scope: Scope) -> Result<()> {
        self.sched_core(
            "push",
            libc::PR_SCHED_CORE_SHARE_TO,
            task,
            scope.as_prctl(),
            std::ptr::null_mut(),
        )
    }
}
