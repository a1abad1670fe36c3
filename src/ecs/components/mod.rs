//! ECS components (hand targets, body kinds).

pub mod interaction;

pub use interaction::*;
