pub mod account;
pub mod browse;
pub mod cart;
pub mod favorites;
pub mod utils;
