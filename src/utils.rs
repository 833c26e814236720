pub mod csv;
pub mod image;
pub mod iterator;
