pub mod availability;
pub mod health;
pub mod jobs;
pub mod preferences;
pub mod technicians;
pub mod time_slots;
