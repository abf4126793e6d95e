pub mod audit;
pub mod errors;
pub mod product;
pub mod user;
