// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod format;
pub mod log;
pub mod operator;
pub mod progress;
pub mod recruit;
pub mod store;
