//! # Availability Checker
//!
//! Decides whether a technician can take a job in a given slot on a given
//! date. The gates run in a fixed order and short-circuit on the first
//! failure, so every rejection carries the most specific error available
//! and the conflict query (the most expensive step) only runs for
//! requests that already passed the cheap checks:
//!
//! 1. Technician exists and is active
//! 2. Time slot exists and is active
//! 3. The slot window fits inside the technician's working hours
//!    (skipped when the technician has no hour bounds)
//! 4. No other ASSIGNED job holds the same (technician, date, slot)
//!
//! COMPLETED jobs never block a slot; once a job finishes, the triple is
//! reusable.

use chrono::{NaiveDate, Utc};
use fieldsync_core::errors::{DispatchError, DispatchResult};
use fieldsync_core::models::technician::TechnicianSummary;
use fieldsync_core::models::time_window::TimeWindow;
use fieldsync_db::models::{DbTechnician, DbTimeSlot};
use fieldsync_db::repositories::{job, technician, time_slot};
use sqlx::PgPool;
use uuid::Uuid;

/// Working window of a technician row; `None` means hours unconstrained.
pub fn working_window(technician: &DbTechnician) -> Option<TimeWindow> {
    match (technician.work_start_minute, technician.work_end_minute) {
        (Some(start), Some(end)) => Some(TimeWindow {
            start: start as u16,
            end: end as u16,
        }),
        _ => None,
    }
}

/// The pure assignment policy, separated from the queries that feed it:
/// active technician, active slot, working-hours containment, then the
/// conflict verdict. Boundary equality with the working window counts as
/// contained.
pub fn validate_assignment(
    technician: &DbTechnician,
    slot: &DbTimeSlot,
    has_conflict: bool,
) -> DispatchResult<()> {
    if !technician.is_active {
        return Err(DispatchError::Inactive(format!(
            "Technician {}",
            technician.name
        )));
    }
    if !slot.is_active {
        return Err(DispatchError::Inactive(format!("Time slot {}", slot.label)));
    }

    if let Some(working) = working_window(technician) {
        let slot_window = slot.window();
        if !working.contains(slot_window) {
            return Err(DispatchError::OutsideWorkingHours {
                working,
                slot: slot_window,
            });
        }
    }

    if has_conflict {
        return Err(DispatchError::DoubleBooked);
    }

    Ok(())
}

/// Runs the full availability gate against the store. Returns the loaded
/// technician and slot so the scheduler does not have to re-query them.
pub async fn check_availability(
    pool: &PgPool,
    technician_id: Uuid,
    scheduled_date: NaiveDate,
    time_slot_id: Uuid,
) -> DispatchResult<(DbTechnician, DbTimeSlot)> {
    let technician = technician::get_technician_by_id(pool, technician_id)
        .await
        .map_err(DispatchError::Database)?
        .ok_or_else(|| DispatchError::NotFound(format!("Technician {technician_id}")))?;

    let slot = time_slot::get_time_slot_by_id(pool, time_slot_id)
        .await
        .map_err(DispatchError::Database)?
        .ok_or_else(|| DispatchError::NotFound(format!("Time slot {time_slot_id}")))?;

    // Cheap policy checks before the conflict query
    validate_assignment(&technician, &slot, false)?;

    let conflict = job::find_conflicting_job(pool, technician_id, scheduled_date, time_slot_id)
        .await
        .map_err(DispatchError::Database)?;
    if conflict.is_some() {
        return Err(DispatchError::DoubleBooked);
    }

    Ok((technician, slot))
}

/// Active technicians free to take the slot on the date: no ASSIGNED job
/// for the triple, and the slot fits their working hours. The same
/// containment rule applies here as at create time, so a technician this
/// listing offers will also pass `check_availability`.
pub async fn list_available_technicians(
    pool: &PgPool,
    scheduled_date: NaiveDate,
    time_slot_id: Uuid,
) -> DispatchResult<Vec<TechnicianSummary>> {
    let today = Utc::now().date_naive();
    if scheduled_date < today {
        return Err(DispatchError::PastDate(scheduled_date));
    }

    let slot = time_slot::get_time_slot_by_id(pool, time_slot_id)
        .await
        .map_err(DispatchError::Database)?
        .ok_or_else(|| DispatchError::NotFound(format!("Time slot {time_slot_id}")))?;
    if !slot.is_active {
        return Err(DispatchError::Inactive(format!("Time slot {}", slot.label)));
    }

    let booked = job::booked_technician_ids(pool, scheduled_date, time_slot_id)
        .await
        .map_err(DispatchError::Database)?;

    let technicians = technician::list_active_technicians(pool)
        .await
        .map_err(DispatchError::Database)?;

    let slot_window = slot.window();
    let available = technicians
        .into_iter()
        .filter(|t| !booked.contains(&t.id))
        .filter(|t| working_window(t).is_none_or(|working| working.contains(slot_window)))
        .map(|t| TechnicianSummary {
            id: t.id,
            name: t.name,
            phone: t.phone,
        })
        .collect();

    Ok(available)
}
