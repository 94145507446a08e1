//! Request and response models

pub mod contact;
pub mod request;

pub use contact::*;
pub use request::*;
