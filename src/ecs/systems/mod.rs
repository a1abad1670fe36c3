//! ECS systems (contact lifecycle dispatch).

pub mod contact_lifecycle;

pub use contact_lifecycle::ContactLifecycle;
