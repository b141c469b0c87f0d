pub mod institutions;
pub mod login;
pub mod register;
pub mod users;
