pub mod diagnostics;
pub mod runner;
