#[cfg(feature = "memory")]
pub mod cli;
