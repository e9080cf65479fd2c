pub mod pets;

pub use pets::*;
