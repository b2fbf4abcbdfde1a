pub mod images;
pub mod objects;
pub mod upload;
