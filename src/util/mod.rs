pub mod math;

pub use math::{multiply, multiply_i32, product, product_i32, zeroed};
