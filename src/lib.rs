pub mod cli;
pub mod config;
pub mod orbit;
pub mod output;
pub mod plotting;
pub mod report;
pub mod sweep;
pub mod trail;
pub mod workspace;
