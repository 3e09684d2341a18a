pub mod error;
pub mod layout;
pub mod lyon;
pub mod range;
pub mod shapes;
pub mod text;
pub mod types;
pub mod value;
