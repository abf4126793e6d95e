pub mod audit;
pub mod products;
