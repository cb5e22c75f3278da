pub mod commands;
pub mod conv;
pub mod fetch;
pub mod get;
pub mod parse;
pub mod reactions;
pub mod utils;
