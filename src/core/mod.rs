pub mod alias;
pub mod commands;
pub mod env;
pub mod list;
pub mod state;
