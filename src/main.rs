//! resumen CLI - dataset summaries and quality diagnostics.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]

use std::process::ExitCode;

fn main() -> ExitCode {
    resumen::cli::run()
}
