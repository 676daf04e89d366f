pub mod bootstrap;
pub mod create;
pub mod delete;
pub mod get;
pub mod login;

pub const ROOT_USERNAME: &str = "root";
pub const ROOT_EMAIL: &str = "root@localhost";
