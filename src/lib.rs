pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod navigator;
pub mod picker;
pub mod process;
