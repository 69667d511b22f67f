pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;

// Re-export the modules here for easy import elsewhere.
pub use connection::*;
