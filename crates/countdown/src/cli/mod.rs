//! # CLI Layer
//!
//! One possible UI client for countdownapp, not the application itself.
//!
//! 1. **Argument Parsing** ([`setup`]): shell arguments into typed commands
//! 2. **Context Setup** ([`commands`]): logging, config, the store and the api
//! 3. **Dispatch** ([`commands`]): one handler per subcommand
//! 4. **Output Formatting** ([`render`]): styled, width-aware text

mod commands;
mod render;
mod setup;

pub use commands::run;
