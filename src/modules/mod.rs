pub mod checkout;
pub mod nvp;
pub mod purchases;
pub mod subscriptions;
