//! Process-wide environment shared with every launched process.
//!
//! The variables set here live for the rest of the process and are
//! inherited by the processes the launcher starts. There is no teardown.

use std::sync::Once;
use tracing::info;

/// Variable selecting the line format of the middleware console logger.
pub const CONSOLE_OUTPUT_FORMAT_VAR: &str = "RCUTILS_CONSOLE_OUTPUT_FORMAT";

/// Line format applied to every launched process' console output.
pub const CONSOLE_OUTPUT_FORMAT: &str = "{time}: [{name}] [{severity}]\t{message}";

static CONFIGURE: Once = Once::new();

/// Apply the process environment.
///
/// Only the first call has an effect; it returns `true`, later calls return
/// `false`.
///
/// # Single-threaded startup
///
/// The first call writes the process environment, which is only sound while
/// no other thread reads or writes it. Call this at the top of `main`, before
/// spawning threads or starting a runtime, and before any launched process or
/// external logger reads the environment. Later calls never write and are
/// safe at any time.
pub fn configure_process_environment() -> bool {
    let mut applied = false;

    CONFIGURE.call_once(|| {
        // SAFETY: the first call happens during single-threaded startup, as
        // required above.
        unsafe { std::env::set_var(CONSOLE_OUTPUT_FORMAT_VAR, CONSOLE_OUTPUT_FORMAT) };
        applied = true;
    });

    if applied {
        info!(
            var = CONSOLE_OUTPUT_FORMAT_VAR,
            format = CONSOLE_OUTPUT_FORMAT,
            "Process environment configured"
        );
    }

    applied
}

/// Whether [configure_process_environment] has run in this process.
pub fn is_configured() -> bool {
    CONFIGURE.is_completed()
}
