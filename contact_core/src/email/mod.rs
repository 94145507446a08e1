//! Email delivery for accepted contact submissions
//!
//! The dispatcher owns the delivery decision; transports only know how to hand a
//! message to one channel. Two channels exist: the provider API and the log.

pub mod dispatcher;
pub mod message;
pub mod resend;
pub mod transport;

pub use dispatcher::{DegradedReason, DeliveryOutcome, EmailDispatcher};
pub use message::ContactEmail;
pub use resend::ResendTransport;
pub use transport::{DeliveryChannel, DeliveryError, DeliveryReceipt, EmailTransport, LogTransport};
