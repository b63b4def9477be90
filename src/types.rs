use std::fmt;

/// Kernel-assigned identifier of a task, thread group or process group.
///
/// Zero never comes out of the validator: in user input it is the "not
/// supplied" sentinel, while at the prctl boundary it addresses the calling
/// task itself (`TaskId::CURRENT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub libc::pid_t);

impl TaskId {
    /// The calling task, for PULL/PUSH/CREATE on the local process.
    pub const CURRENT: TaskId = TaskId(0);

    pub fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How broadly a CREATE or PUSH action's cookie ownership extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// A single task (`pid` on the command line).
    Task,
    /// Every thread of the task's thread group (`tgid`).
    ThreadGroup,
    /// Every task in the process group (`pgid`).
    #[default]
    ProcessGroup,
}

impl Scope {
    pub fn as_prctl(self) -> libc::c_ulong {
        match self {
            Scope::Task => libc::PR_SCHED_CORE_SCOPE_THREAD as libc::c_ulong,
            Scope::ThreadGroup => libc::PR_SCHED_CORE_SCOPE_THREAD_GROUP as libc::c_ulong,
            Scope::ProcessGroup => libc::PR_SCHED_CORE_SCOPE_PROCESS_GROUP as libc::c_ulong,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Scope::Task => "pid",
            Scope::ThreadGroup => "tgid",
            Scope::ProcessGroup => "pgid",
        };
        write!(f, "{keyword}")
    }
}

/// Which subcommand was named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Get,
    Create,
    Copy,
    Exec,
}

/// A command whose preconditions hold. Only `parser::validate` builds one,
/// so dispatch can rely on every operand it needs being present and
/// non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Get {
        source: TaskId,
    },
    Create {
        source: TaskId,
        scope: Scope,
    },
    Copy {
        source: TaskId,
        dest: TaskId,
        scope: Scope,
    },
    Exec {
        /// Task to adopt the cookie from; a fresh cookie is minted for the
        /// child when absent.
        source: Option<TaskId>,
        /// Program and arguments, guaranteed non-empty.
        argv: Vec<String>,
    },
}
