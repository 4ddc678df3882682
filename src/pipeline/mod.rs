pub mod dating;
pub mod import;
pub mod rename;
pub mod summary;
