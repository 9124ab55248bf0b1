//! Auth-domain identifiers and the engine-issued access token model.

pub mod id;
pub mod token;

pub use id::*;
pub use token::*;
