pub mod db;
pub mod error;
pub mod random;
pub mod schemas;
pub mod store;
