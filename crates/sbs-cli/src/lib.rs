pub mod cli;
pub mod select;
pub mod util;
