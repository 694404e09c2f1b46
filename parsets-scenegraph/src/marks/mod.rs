pub mod group;
pub mod line;
pub mod mark;
pub mod path;
pub mod rect;
pub mod text;
