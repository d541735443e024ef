pub mod paimon;
pub mod record;

pub use paimon::*;
pub use record::*;
