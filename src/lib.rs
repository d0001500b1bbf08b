// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod logging;
pub mod model;
pub mod phone;
pub mod print;
pub mod printer;
pub mod row;
pub mod scheduler;
pub mod storage;

#[cfg(feature = "tui")]
pub mod tui;
