pub mod battle;
pub mod kitchen;
