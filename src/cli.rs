//! CLI domain: parse, route, output, and presentation only.
//! Engine behavior lives in `engine`; this module only wires flags to it.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use presentation::{
    format_generator_list, format_plan, format_run_summary, format_section_heading,
};
pub use route::CommandContext;
