pub mod color;
pub mod error;
pub mod lyon;
pub mod types;
pub mod value;
