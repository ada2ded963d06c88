//! Exit code constants for the conveyor CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid build description, unknown task)
//! - 2: Configuration failure (a task configurator failed)
//! - 3: I/O failure (preference or descriptor file unreadable/unwritable)
//! - 4: Task failure (a task failed while executing)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid build description, or unknown task.
pub const USER_ERROR: i32 = 1;

/// A registered configuration action failed during dispatch.
pub const CONFIGURATION_FAILURE: i32 = 2;

/// A persisted file could not be read, parsed or written.
pub const IO_FAILURE: i32 = 3;

/// A task action or finalizer failed during execution.
pub const TASK_FAILURE: i32 = 4;
