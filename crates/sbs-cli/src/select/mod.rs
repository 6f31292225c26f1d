pub mod input;
pub mod load_data;
pub mod output;
pub mod runner;
