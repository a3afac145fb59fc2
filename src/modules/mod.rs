pub mod access;
pub mod health;
pub mod permissions;
pub mod roles;
