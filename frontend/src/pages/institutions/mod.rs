pub mod fixtures;
pub mod repository;
pub mod utils;
pub mod view_model;
