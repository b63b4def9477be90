//! Fork/wait behavior of the helper orchestration, exercised with real
//! child processes. No kernel cookie calls are involved, so these run
//! unprivileged on any kernel.

use nix::errno::Errno;

use coresched::error::Error;
use coresched::helper::run_in_helper;

#[test]
fn helper_success_translates_to_ok() {
    run_in_helper("test helper", || Ok(())).unwrap();
}

#[test]
fn helper_kernel_error_becomes_the_child_status() {
    let err = run_in_helper("test helper", || {
        Err(Error::Kernel {
            action: "pull",
            errno: Errno::ESRCH,
        })
    })
    .unwrap_err();
    match err {
        Error::HelperFailed { status, .. } => assert_eq!(status, Errno::ESRCH as i32),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn helper_failure_message_names_the_role() {
    let err = run_in_helper("cookie-transfer helper", || {
        Err(Error::Kernel {
            action: "push",
            errno: Errno::EPERM,
        })
    })
    .unwrap_err();
    assert!(err.to_string().contains("cookie-transfer helper"));
}
