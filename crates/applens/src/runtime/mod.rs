//! Runtime module: process lifecycle (boot, arguments, run).

pub mod boot;
pub mod cli;
pub mod run;
