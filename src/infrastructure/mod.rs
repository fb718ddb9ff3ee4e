pub mod backends;
pub mod secrets;
