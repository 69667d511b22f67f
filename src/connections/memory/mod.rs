mod memory_connection;

pub use memory_connection::*;
