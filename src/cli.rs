//! CLI domain: parse, route, and output only.
//! Single route table dispatches to the client facade.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use route::{read_records, EndpointFlags, RunContext};
