//! zp library - expose command modules for testing

pub mod commands;
pub mod common;
pub mod errors;

pub use common::GlobalOpts;
pub use zp_logger as logger;
