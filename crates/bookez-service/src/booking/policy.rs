//! Pure validation policy for booking requests.
//!
//! Everything here is free of I/O so the rules can be tested directly.
//! The orchestrator calls these in its fixed validation order and the
//! repositories only ever see already-validated values.

use chrono::{NaiveDateTime, Duration};
use rand::RngExt;

use bookez_core::config::booking::BookingPolicyConfig;
use bookez_core::error::AppError;
use bookez_core::result::AppResult;
use bookez_core::types::id::MemberId;
use bookez_entity::room::Room;
use bookez_entity::schedule::TimeWindow;

/// Generate a human-readable booking code (e.g. `BK-7F3A2C4D`).
pub fn booking_code() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..4)
        .map(|_| format!("{:02X}", rng.random::<u8>()))
        .collect();
    format!("BK-{suffix}")
}

/// Validation 4: the requested start must not lie further in the past
/// than the policy buffer allows.
pub fn ensure_not_past(
    window: &TimeWindow,
    now: NaiveDateTime,
    buffer_minutes: i64,
) -> AppResult<()> {
    let earliest = now - Duration::minutes(buffer_minutes);
    if window.start_at() < earliest {
        return Err(AppError::policy(
            "Requested start time is in the past",
        ));
    }
    Ok(())
}

/// Validation 5: end after start and at least the minimum duration.
/// The minimum exists so a booking always outlives the no-show grace
/// window.
pub fn ensure_duration(window: &TimeWindow, policy: &BookingPolicyConfig) -> AppResult<()> {
    if window.end <= window.start {
        return Err(AppError::policy("End time must be after start time"));
    }
    if window.duration_minutes() < policy.min_duration_minutes {
        return Err(AppError::policy(format!(
            "Booking must last at least {} minutes",
            policy.min_duration_minutes
        )));
    }
    Ok(())
}

/// Validation 7: roster size within the room's capacity bounds.
pub fn ensure_capacity(room: &Room, roster_size: usize) -> AppResult<()> {
    if !room.fits(roster_size) {
        return Err(AppError::policy(format!(
            "Roster of {} is outside the room capacity of {}-{}",
            roster_size, room.capacity_min, room.capacity_max
        )));
    }
    Ok(())
}

/// Validation 8 (first half): assemble the leader-first roster, rejecting
/// duplicate member IDs.
pub fn build_roster(
    leader: MemberId,
    participants: &[MemberId],
) -> AppResult<Vec<MemberId>> {
    let mut roster = Vec::with_capacity(participants.len() + 1);
    roster.push(leader);
    for member in participants {
        if roster.contains(member) {
            return Err(AppError::eligibility(
                "Duplicate member in booking roster",
            ));
        }
        roster.push(*member);
    }
    Ok(roster)
}

/// Reschedule cutoff: the current start must still be at least the
/// configured margin away.
pub fn ensure_before_cutoff(
    current_start: NaiveDateTime,
    now: NaiveDateTime,
    cutoff_minutes: i64,
) -> AppResult<()> {
    if now > current_start - Duration::minutes(cutoff_minutes) {
        return Err(AppError::state(format!(
            "Reschedule is only allowed up to {cutoff_minutes} minutes before the start time"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use bookez_core::types::id::RoomId;
    use bookez_entity::room::{RoomAvailability, RoomKind};

    fn window(date: &str, start: &str, end: &str) -> TimeWindow {
        TimeWindow::new(
            date.parse().unwrap(),
            start.parse().unwrap(),
            end.parse().unwrap(),
        )
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        date.parse::<NaiveDate>()
            .unwrap()
            .and_time(time.parse::<NaiveTime>().unwrap())
    }

    fn room(min: i32, max: i32) -> Room {
        Room {
            id: RoomId::new(),
            name: "Room A".to_string(),
            kind: RoomKind::General,
            capacity_min: min,
            capacity_max: max,
            availability: RoomAvailability::Available,
            photo_ref: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_booking_code_shape() {
        let code = booking_code();
        assert!(code.starts_with("BK-"));
        assert_eq!(code.len(), 11);
        assert!(code[3..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_past_start_rejected_with_zero_buffer() {
        let w = window("2025-06-01", "10:00:00", "10:20:00");
        let now = at("2025-06-01", "10:00:01");
        assert!(ensure_not_past(&w, now, 0).is_err());
        assert!(ensure_not_past(&w, at("2025-06-01", "10:00:00"), 0).is_ok());
    }

    #[test]
    fn test_buffer_tolerates_recent_past() {
        let w = window("2025-06-01", "10:00:00", "10:20:00");
        assert!(ensure_not_past(&w, at("2025-06-01", "10:04:00"), 5).is_ok());
        assert!(ensure_not_past(&w, at("2025-06-01", "10:06:00"), 5).is_err());
    }

    #[test]
    fn test_duration_minimum() {
        let policy = BookingPolicyConfig::default();
        assert!(ensure_duration(&window("2025-06-01", "10:00:00", "10:14:00"), &policy).is_err());
        assert!(ensure_duration(&window("2025-06-01", "10:00:00", "10:15:00"), &policy).is_ok());
        assert!(ensure_duration(&window("2025-06-01", "10:00:00", "10:00:00"), &policy).is_err());
        assert!(ensure_duration(&window("2025-06-01", "10:30:00", "10:00:00"), &policy).is_err());
    }

    #[test]
    fn test_capacity_bounds() {
        let r = room(2, 4);
        assert!(ensure_capacity(&r, 1).is_err());
        assert!(ensure_capacity(&r, 2).is_ok());
        assert!(ensure_capacity(&r, 4).is_ok());
        assert!(ensure_capacity(&r, 5).is_err());
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        let leader = MemberId::new();
        let other = MemberId::new();
        assert_eq!(build_roster(leader, &[other]).unwrap().len(), 2);
        assert!(build_roster(leader, &[leader]).is_err());
        assert!(build_roster(leader, &[other, other]).is_err());
    }

    #[test]
    fn test_reschedule_cutoff() {
        let start = at("2025-06-01", "10:00:00");
        // 30 minutes before start: too late with a 60-minute cutoff.
        assert!(ensure_before_cutoff(start, at("2025-06-01", "09:30:00"), 60).is_err());
        // Exactly one hour before: still allowed.
        assert!(ensure_before_cutoff(start, at("2025-06-01", "09:00:00"), 60).is_ok());
        assert!(ensure_before_cutoff(start, at("2025-06-01", "08:00:00"), 60).is_ok());
    }
}
