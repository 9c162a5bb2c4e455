pub mod animator;
pub mod layout;
