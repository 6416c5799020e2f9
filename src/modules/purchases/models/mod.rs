pub mod purchase;
pub mod transaction;

pub use purchase::{LineItem, PurchaseDetails};
pub use transaction::{PaymentReceipt, PaymentStatus, TransactionDetails, TransactionItem};
