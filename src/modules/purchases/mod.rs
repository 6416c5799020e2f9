pub mod models;
pub mod services;

pub use models::{
    LineItem, PaymentReceipt, PaymentStatus, PurchaseDetails, TransactionDetails, TransactionItem,
};
pub use services::Purchase;
