//! Delivery channels used by the poll pipeline and the mower action
//! handlers to push messages outside the service.

pub mod discord;
pub mod log;
