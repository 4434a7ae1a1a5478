//! Tool protocol definitions.
//!
//! Synthesized tools are the engine's only output: a descriptor an automation
//! caller can read, plus an executable handler bound to live elements.

mod definition;
mod schema;
mod traits;

pub use definition::*;
pub use schema::*;
pub use traits::*;
