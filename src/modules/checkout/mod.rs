pub mod client;
pub mod flow;
pub mod models;
pub mod operation;

pub use client::NvpClient;
pub use flow::{Checkout, DigitalGoods};
pub use models::{CheckoutDetails, CheckoutToken};
pub use operation::Operation;
