pub mod arc;
pub mod area;
pub mod group;
pub mod line;
pub mod mark;
pub mod path;
pub mod rect;
pub mod rule;
pub mod symbol;
pub mod text;
