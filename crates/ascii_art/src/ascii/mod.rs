pub mod color;
pub mod gradient;
pub mod grid;
pub mod mapping;
