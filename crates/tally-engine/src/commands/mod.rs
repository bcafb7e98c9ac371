//! Command orchestration layer
//!
//! Each command logs one `start` and one `end` or `end_error` event and
//! reports its result as a value the CLI turns into an exit code.

pub mod credentials;
pub mod engine_command;
pub mod markets;
pub mod withdraw_voucher;

/// Exit code for a failure before or while contacting the notary
pub const EXIT_FAILURE: i32 = -1;
/// Exit code for a successful command with nothing to show
pub const EXIT_EMPTY: i32 = 0;
/// Exit code for a successful command that produced output
pub const EXIT_PRODUCED: i32 = 1;

/// Listing commands exit 0 when there is nothing to list and 1 otherwise
pub fn listing_exit_code(items: usize) -> i32 {
    if items == 0 {
        EXIT_EMPTY
    } else {
        EXIT_PRODUCED
    }
}
