//! External collaborator interfaces the scheduling core depends on.
//!
//! Address resolution and notification delivery are owned by subsystems
//! outside this core; the engine only sees the narrow traits defined here.
//! Both are best-effort: the scheduler never fails a booking because a
//! collaborator was unavailable.

pub mod notifier;
pub mod resolver;

pub use notifier::{LoggingNotifier, Notifier};
pub use resolver::{
    parse_address, state_code_for_name, state_name_for_code, AddressResolver, GoogleGeocoder,
    ParsedAddress,
};
