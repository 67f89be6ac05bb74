pub mod order;
pub mod score;
