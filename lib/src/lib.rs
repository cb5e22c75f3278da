pub mod aliases;
pub mod client;
pub mod parse;
pub mod record;
pub use crate::client::KeggClient;
pub use crate::parse::parse_response;
pub use crate::record::KeggRecord;
#[macro_use]
extern crate derive_builder;
