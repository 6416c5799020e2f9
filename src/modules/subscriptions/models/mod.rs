pub mod profile;
pub mod subscription;

pub use profile::{ProfileCreated, ProfileDetails, ProfileStatus, ProfileStatusChanged, StatusAction};
pub use subscription::{BillingPeriod, SubscriptionDetails, TrialTerms, START_DATE_FORMAT};
