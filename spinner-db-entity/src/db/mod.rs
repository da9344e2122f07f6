pub mod spinner;
pub mod user;
