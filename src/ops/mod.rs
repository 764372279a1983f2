pub mod elementwise;
pub mod matrix_vector;
pub mod sign_flip;

pub use matrix_vector::BinaryOp;
