pub mod error;

// CSV response types
pub mod csv;
