pub mod index;
pub mod subscriptions;
