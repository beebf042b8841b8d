/// Serde helpers for writing large integers as decimal strings.
pub mod decimal;

/// Hexadecimal encoding utilities.
pub mod hex;

/// File system utilities.
pub mod io;

/// String manipulation utilities.
pub mod strings;
