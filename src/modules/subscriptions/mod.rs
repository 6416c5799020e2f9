pub mod models;
pub mod services;

pub use models::{
    BillingPeriod, ProfileCreated, ProfileDetails, ProfileStatus, ProfileStatusChanged,
    StatusAction, SubscriptionDetails, TrialTerms,
};
pub use services::Subscription;
