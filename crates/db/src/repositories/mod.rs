pub mod job;
pub mod preferences;
pub mod technician;
pub mod time_slot;
