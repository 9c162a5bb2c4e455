pub mod barba;
pub mod fetch;
pub mod source;
