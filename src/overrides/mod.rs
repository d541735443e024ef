pub mod apply;
pub mod maintain;
pub mod report;
pub mod table;

pub use apply::*;
pub use maintain::*;
pub use report::*;
pub use table::*;
