pub mod definitions;
pub mod store;

pub use definitions::*;
pub use store::*;
