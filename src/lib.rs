//! Supply Lines - supply simulation for tactical grid battles

pub mod core;
pub mod supply;
