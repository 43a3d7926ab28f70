pub mod analysis;
pub mod benchmark;
pub mod budget;
