//! Name-value-pair wire format used by PayPal's classic API

pub mod request;
pub mod response;

pub use request::NvpRequest;
pub use response::{human_key, Ack, ApiMessage, NvpResponse};
