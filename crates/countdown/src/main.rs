//! # Countdown CLI
//!
//! The binary is thin: everything lives in `src/cli/`, and this file only runs
//! it and turns a failure into an `Error:` line and exit code 1.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/countdown/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - logging, config and context wiring, dispatch (commands)  │
//! │  - terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (countdownapp::api)                              │
//! │  - Dispatches to command modules                            │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands, Store and Clock (countdownapp)                   │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI is the only place that knows about terminals, colors, exit codes
//! and the passage of real time (the `watch` loop).
//!
//! ## Testing Approach
//!
//! - Argument parsing is tested by feeding argument vectors to clap.
//! - Rendering is tested with canned `DisplayCountdown`s and colors off.
//! - `tests/cli_e2e.rs` drives the real binary against a temp data file.

mod cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
