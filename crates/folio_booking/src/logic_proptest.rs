#[cfg(test)]
mod tests {
    use crate::logic::{compute_availability, WorkingHours};
    use chrono::{Duration, TimeZone, Utc};
    use chrono_tz::Tz;
    use folio_common::models::{Booking, BookingSettings, MeetingType};
    use folio_config::BookingConfig;
    use proptest::prelude::*;

    fn settings(durations: &[i64]) -> BookingSettings {
        BookingSettings {
            enabled: true,
            timezone: "Europe/Zurich".to_string(),
            meeting_types: durations
                .iter()
                .enumerate()
                .map(|(i, minutes)| MeetingType {
                    id: format!("m{}", i),
                    label: format!("Meeting {}", i),
                    duration_minutes: *minutes,
                })
                .collect(),
            blocked_dates: Vec::new(),
        }
    }

    fn bookings(specs: &[(i64, i64)]) -> Vec<Booking> {
        let base = Utc.with_ymd_and_hms(2030, 6, 3, 6, 0, 0).unwrap();
        specs
            .iter()
            .map(|(offset_minutes, minutes)| {
                let start = base + Duration::minutes(*offset_minutes);
                Booking::new_pending(
                    "Ada".to_string(),
                    "ada@example.com".to_string(),
                    "m0".to_string(),
                    start,
                    start + Duration::minutes(*minutes),
                    base,
                )
            })
            .collect()
    }

    proptest! {
        // Exactly N consecutive days, ascending
        #[test]
        fn returns_exactly_n_ascending_days(
            days in 1u32..=60,
            start_offset_hours in 0i64..(24 * 365),
        ) {
            let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
                + Duration::hours(start_offset_hours);
            let hours = WorkingHours::from_config(&BookingConfig::default()).unwrap();

            let result = compute_availability(
                &settings(&[30]),
                Tz::Europe__Zurich,
                true,
                &[],
                &hours,
                now,
                days,
            );

            prop_assert_eq!(result.len(), days as usize);
            for pair in result.windows(2) {
                prop_assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
            }
        }

        // Available slots never overlap an existing booking
        #[test]
        fn available_slots_never_overlap_bookings(
            durations in prop::collection::vec(15i64..=120, 1..4),
            specs in prop::collection::vec((0i64..(5 * 24 * 60), 15i64..=180), 0..12),
        ) {
            let existing = bookings(&specs);
            let hours = WorkingHours::from_config(&BookingConfig::default()).unwrap();
            let now = Utc.with_ymd_and_hms(2030, 6, 3, 0, 0, 0).unwrap();

            let result = compute_availability(
                &settings(&durations),
                Tz::Europe__Zurich,
                true,
                &existing,
                &hours,
                now,
                7,
            );

            for day in &result {
                for slot in day.slots.iter().filter(|s| s.available) {
                    prop_assert!(slot.start_at > now);
                    prop_assert!(!existing.iter().any(|b| b.overlaps(slot.start_at, slot.end_at)));
                }
                for pair in day.slots.windows(2) {
                    prop_assert!(
                        (pair[0].start_at, pair[0].end_at) <= (pair[1].start_at, pair[1].end_at)
                    );
                }
            }
        }
    }
}
