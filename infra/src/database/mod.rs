//! Database module - MySQL-backed delivery log using SQLx

pub mod connection;
pub mod mysql;

pub use connection::connect_pool;
pub use mysql::MySqlMessageRepository;
