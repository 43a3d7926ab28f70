pub mod sector;

pub use sector::{compare_to_sector, BenchmarkRow, Sector, SectorBenchmark};
