pub mod ball;
pub mod node;
pub mod rect;
