pub mod score;
pub mod train;
