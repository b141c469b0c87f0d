mod auth;
pub mod client;
mod organizations;
pub mod types;
mod users;

pub use client::*;
pub use types::*;
