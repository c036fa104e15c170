//!
//! Turning the outcome of a run into an exit code
//!

use std::io::Write;

use crate::Error;

/// Exit code for any fatal error (255 on Unix)
pub const EXIT_FAILURE: i32 = -1;

/// Report how a run went and pick the process exit code
///
/// A fatal error is logged and also written to `out`, where the tensor dump would have gone.
pub fn finish(out: &mut impl Write, result: &Result<(), Error>) -> i32 {
    let Err(err) = result else {
        return 0;
    };

    error!("{err}");
    if let Err(write_err) = writeln!(out, "{err}").and_then(|()| out.flush()) {
        error!("Failed to report error: {write_err}");
    }

    EXIT_FAILURE
}
