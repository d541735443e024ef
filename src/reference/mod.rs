pub mod catalog;
pub mod client;
pub mod sources;

pub use catalog::*;
pub use client::*;
pub use sources::*;
