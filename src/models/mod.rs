pub mod element;
pub mod file_ref;
pub mod path;
