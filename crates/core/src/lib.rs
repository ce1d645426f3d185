//! # FieldSync Core
//!
//! Domain types shared across the FieldSync workspace: the time-window
//! arithmetic the scheduler is built on, the job/technician/slot models,
//! and the error taxonomy every scheduling gate reports through.
//!
//! This crate is IO-free. Persistence lives in `fieldsync-db` and the HTTP
//! surface plus the scheduling engine live in `fieldsync-api`.

pub mod errors;
pub mod models;
