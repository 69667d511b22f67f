pub mod errors;
pub mod goose_mgr;

// Re-export the modules here for easy import elsewhere.
pub use errors::*;
pub use goose_mgr::*;
