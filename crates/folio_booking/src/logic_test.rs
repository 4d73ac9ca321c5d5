#[cfg(test)]
mod tests {
    use crate::error::BookingError;
    use crate::logic::{compute_availability, validate_slot_alignment, WorkingHours};
    use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
    use chrono_tz::Tz;
    use folio_common::models::{Booking, BookingSettings, MeetingType};
    use folio_config::BookingConfig;

    const TORONTO: Tz = Tz::America__Toronto;

    fn meeting(id: &str, minutes: i64) -> MeetingType {
        MeetingType {
            id: id.to_string(),
            label: id.to_string(),
            duration_minutes: minutes,
        }
    }

    fn settings(meeting_types: Vec<MeetingType>) -> BookingSettings {
        BookingSettings {
            enabled: true,
            timezone: "America/Toronto".to_string(),
            meeting_types,
            blocked_dates: Vec::new(),
        }
    }

    fn office_hours() -> WorkingHours {
        WorkingHours::from_config(&BookingConfig::default()).unwrap()
    }

    // 2030-01-07 is a Monday; Toronto is at UTC-5 in January.
    fn utc(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, day, hour, minute, 0).unwrap()
    }

    fn booked(start: DateTime<Utc>, minutes: i64) -> Booking {
        Booking::new_pending(
            "Grace".to_string(),
            "grace@example.com".to_string(),
            "intro".to_string(),
            start,
            start + Duration::minutes(minutes),
            utc(1, 0, 0),
        )
    }

    #[test]
    fn toronto_thirty_minute_day_is_fully_available() {
        let settings = settings(vec![meeting("intro", 30)]);
        let days = compute_availability(
            &settings,
            TORONTO,
            true,
            &[],
            &office_hours(),
            utc(7, 10, 0),
            1,
        );

        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2030, 1, 7).unwrap());
        assert_eq!(day.slots.len(), 16);
        assert!(day.slots.iter().all(|s| s.available));
        assert!(day.slots.iter().all(|s| s.end_at - s.start_at == Duration::minutes(30)));
        assert_eq!(day.slots[0].start_at, utc(7, 14, 0));
        assert_eq!(day.slots[15].end_at, utc(7, 22, 0));
    }

    #[test]
    fn weekends_have_no_slots() {
        // Saturday 2030-01-05 and Sunday 2030-01-06
        let days = compute_availability(
            &settings(vec![meeting("intro", 30)]),
            TORONTO,
            true,
            &[],
            &office_hours(),
            utc(5, 12, 0),
            3,
        );

        assert_eq!(days.len(), 3);
        assert!(days[0].slots.is_empty());
        assert!(days[1].slots.is_empty());
        assert_eq!(days[2].slots.len(), 16);
    }

    #[test]
    fn disabled_bookings_still_return_every_day() {
        let days = compute_availability(
            &settings(vec![meeting("intro", 30)]),
            TORONTO,
            false,
            &[],
            &office_hours(),
            utc(7, 10, 0),
            5,
        );

        assert_eq!(days.len(), 5);
        assert!(days.iter().all(|d| d.slots.is_empty()));
    }

    #[test]
    fn blocked_dates_have_no_slots() {
        let mut settings = settings(vec![meeting("intro", 30)]);
        settings.blocked_dates = vec![NaiveDate::from_ymd_opt(2030, 1, 8).unwrap()];

        let days = compute_availability(
            &settings,
            TORONTO,
            true,
            &[],
            &office_hours(),
            utc(7, 10, 0),
            2,
        );

        assert_eq!(days[0].slots.len(), 16);
        assert!(days[1].slots.is_empty());
    }

    #[test]
    fn booked_and_past_slots_are_unavailable() {
        let bookings = vec![booked(utc(7, 17, 0), 60)];
        let mut cancelled = booked(utc(7, 19, 0), 30);
        cancelled.status = folio_common::models::BookingStatus::Cancelled;

        let days = compute_availability(
            &settings(vec![meeting("intro", 30)]),
            TORONTO,
            true,
            &[bookings[0].clone(), cancelled],
            &office_hours(),
            utc(7, 15, 10),
            1,
        );

        let unavailable: Vec<_> = days[0]
            .slots
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.start_at)
            .collect();
        assert_eq!(
            unavailable,
            vec![
                utc(7, 14, 0),
                utc(7, 14, 30),
                utc(7, 15, 0),
                utc(7, 17, 0),
                utc(7, 17, 30)
            ]
        );
    }

    #[test]
    fn slots_are_ordered_by_start_then_end_then_type() {
        let days = compute_availability(
            &settings(vec![meeting("deep-dive", 60), meeting("intro", 30)]),
            TORONTO,
            true,
            &[],
            &office_hours(),
            utc(7, 10, 0),
            1,
        );

        let first: Vec<_> = days[0]
            .slots
            .iter()
            .take(3)
            .map(|s| (s.meeting_type.as_str(), s.start_at))
            .collect();
        assert_eq!(
            first,
            vec![
                ("intro", utc(7, 14, 0)),
                ("deep-dive", utc(7, 14, 0)),
                ("intro", utc(7, 14, 30)),
            ]
        );
        assert_eq!(days[0].slots.len(), 16 + 8);
    }

    #[test]
    fn local_times_skipped_by_daylight_saving_are_not_offered() {
        // Clocks in Toronto jump from 02:00 to 03:00 on 2030-03-10.
        let hours = WorkingHours {
            start_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(4, 0, 0).unwrap(),
            working_days: vec![Weekday::Sun],
        };
        let now = Utc.with_ymd_and_hms(2030, 3, 10, 5, 0, 0).unwrap();

        let days = compute_availability(
            &settings(vec![meeting("hour", 60)]),
            TORONTO,
            true,
            &[],
            &hours,
            now,
            1,
        );

        let starts: Vec<_> = days[0].slots.iter().map(|s| s.start_at).collect();
        assert_eq!(
            starts,
            vec![
                Utc.with_ymd_and_hms(2030, 3, 10, 5, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2030, 3, 10, 6, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2030, 3, 10, 7, 0, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn aligned_start_returns_slot_end() {
        let settings = settings(vec![meeting("intro", 30)]);
        let end = validate_slot_alignment(
            &settings,
            TORONTO,
            &office_hours(),
            &settings.meeting_types[0],
            utc(8, 15, 30),
            utc(7, 10, 0),
            60,
        )
        .unwrap();
        assert_eq!(end, utc(8, 16, 0));
    }

    #[test]
    fn meeting_types_without_duration_are_rejected() {
        let settings = settings(vec![meeting("zero", 0), meeting("negative", -30)]);
        for meeting in &settings.meeting_types {
            let result = validate_slot_alignment(
                &settings,
                TORONTO,
                &office_hours(),
                meeting,
                utc(7, 15, 0),
                utc(7, 10, 0),
                60,
            );
            assert!(
                matches!(result, Err(BookingError::Validation { field: "meetingType", .. })),
                "{:?}",
                result
            );
        }
    }

    #[test]
    fn misaligned_or_out_of_hours_starts_are_rejected() {
        let settings = settings(vec![meeting("intro", 30), meeting("deep-dive", 60)]);
        let hours = office_hours();
        let now = utc(7, 10, 0);
        let check = |meeting: &MeetingType, start: DateTime<Utc>, max_days: u32| {
            validate_slot_alignment(&settings, TORONTO, &hours, meeting, start, now, max_days)
        };
        let intro = &settings.meeting_types[0];
        let deep = &settings.meeting_types[1];

        // 09:10 local
        assert!(matches!(
            check(intro, utc(7, 14, 10), 60),
            Err(BookingError::Validation { field: "startAt", .. })
        ));
        // 16:30 local, a one hour meeting would end after 17:00
        assert!(check(deep, utc(7, 21, 30), 60).is_err());
        // Saturday
        assert!(check(intro, utc(12, 15, 0), 60).is_err());
        // beyond the lookahead
        assert!(check(intro, utc(14, 15, 0), 7).is_err());
        assert!(check(intro, utc(11, 15, 0), 7).is_ok());
    }

    #[test]
    fn working_hours_are_parsed_from_config() {
        let hours = office_hours();
        assert_eq!(hours.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(hours.working_days.len(), 5);

        let inverted = BookingConfig {
            work_start_time: "17:00".to_string(),
            work_end_time: "09:00".to_string(),
            ..BookingConfig::default()
        };
        assert!(matches!(
            WorkingHours::from_config(&inverted),
            Err(BookingError::Config(_))
        ));

        let bad_day = BookingConfig {
            working_days: vec!["Funday".to_string()],
            ..BookingConfig::default()
        };
        assert!(WorkingHours::from_config(&bad_day).is_err());
    }
}
