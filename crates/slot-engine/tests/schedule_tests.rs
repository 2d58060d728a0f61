//! Tests for provider schedules: weekday windows, blocked periods and the
//! appointment-to-booking glue.

use chrono::{NaiveDate, Weekday};
use slot_engine::{
    earliest_available, Appointment, AppointmentStatus, AppointmentType, BlockedPeriod,
    ConfigurationError, Interval, Priority, ProviderSchedule, SlotDuration, TimeOfDay,
    WorkingWindow,
};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn iv(start: &str, end: &str) -> Interval {
    Interval::parse(start, end).unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// 2026-03-16 is a Monday.
const MONDAY: &str = "2026-03-16";
const SUNDAY: &str = "2026-03-22";

fn appointment(id: &str, provider: &str, on: &str, start: &str, end: &str) -> Appointment {
    Appointment {
        id: id.to_string(),
        provider_id: provider.to_string(),
        patient_id: "pat-100".to_string(),
        date: date(on),
        start: t(start),
        end: t(end),
        status: AppointmentStatus::Scheduled,
        appointment_type: AppointmentType::Consultation,
        priority: Priority::Routine,
        notes: None,
    }
}

fn dr_rao() -> ProviderSchedule {
    ProviderSchedule::new("dr-rao")
        .with_window(
            Weekday::Mon,
            WorkingWindow::new(t("09:00"), t("12:00"), SlotDuration::Min30)
                .with_break(iv("10:30", "11:00")),
        )
        .with_blocked_period(BlockedPeriod {
            date: date(MONDAY),
            interval: iv("11:30", "12:00"),
            reason: "Department meeting".to_string(),
        })
}

#[test]
fn missing_weekday_is_a_day_off() {
    let schedule = dr_rao();
    assert!(!schedule.window_for(date(SUNDAY)).is_working_day);
    assert!(schedule.slots_on(date(SUNDAY), &[]).unwrap().is_empty());
}

#[test]
fn bookings_on_merges_blocks_and_active_appointments() {
    let mut cancelled = appointment("apt-003", "dr-rao", MONDAY, "10:00", "10:30");
    cancelled.status = AppointmentStatus::Cancelled;

    let appointments = vec![
        appointment("apt-001", "dr-rao", MONDAY, "09:00", "09:30"),
        appointment("apt-002", "dr-mehta", MONDAY, "09:30", "10:00"),
        cancelled,
        appointment("apt-004", "dr-rao", "2026-03-17", "09:30", "10:00"),
    ];

    let bookings = dr_rao().bookings_on(date(MONDAY), &appointments);
    assert_eq!(bookings.len(), 2);
    assert!(bookings[0].is_blocked());
    assert_eq!(bookings[0].reason.as_deref(), Some("Department meeting"));
    assert_eq!(bookings[1].appointment_id.as_deref(), Some("apt-001"));
}

#[test]
fn slots_on_reflects_break_blocks_and_appointments() {
    let appointments = vec![appointment("apt-001", "dr-rao", MONDAY, "09:00", "09:30")];
    let slots = dr_rao().slots_on(date(MONDAY), &appointments).unwrap();

    let summary: Vec<(String, bool)> = slots
        .iter()
        .map(|s| (s.interval.start.to_string(), s.available))
        .collect();
    assert_eq!(
        summary,
        [
            ("09:00".to_string(), false),
            ("09:30".to_string(), true),
            ("10:00".to_string(), true),
            ("10:30".to_string(), false),
            ("11:00".to_string(), true),
            ("11:30".to_string(), false),
        ]
    );
}

#[test]
fn free_periods_on_uses_the_same_bookings() {
    let appointments = vec![appointment("apt-001", "dr-rao", MONDAY, "09:00", "09:30")];
    let free = dr_rao().free_periods_on(date(MONDAY), &appointments).unwrap();
    let spans: Vec<Interval> = free.iter().map(|p| p.interval).collect();
    assert_eq!(spans, [iv("09:30", "10:30"), iv("11:00", "11:30")]);
}

#[test]
fn validate_booking_on_rejects_a_sunday() {
    let result = dr_rao().validate_booking_on(date(SUNDAY), &iv("09:00", "09:30"), &[], None);
    assert_eq!(
        result.unwrap_err().to_string(),
        "Provider does not work on this day"
    );
}

#[test]
fn schedule_round_trips_through_json() {
    let json = r#"{
        "providerId": "dr-rao",
        "displayName": "Dr. A. Rao",
        "windows": {
            "Mon": { "isWorkingDay": true, "start": "09:00", "end": "12:00", "slotDuration": 30 },
            "friday": { "isWorkingDay": true, "start": "14:00", "end": "18:00", "slotDuration": 60 }
        },
        "blockedPeriods": [
            { "date": "2026-03-16", "start": "11:00", "end": "12:00", "reason": "CME lecture" }
        ]
    }"#;

    let schedule = ProviderSchedule::from_json(json).unwrap();
    assert_eq!(schedule.display_name.as_deref(), Some("Dr. A. Rao"));
    assert_eq!(schedule.windows.len(), 2);
    assert_eq!(schedule.windows[&Weekday::Fri].slot_duration, 60);

    let back = ProviderSchedule::from_json(&serde_json::to_string(&schedule).unwrap()).unwrap();
    assert_eq!(back, schedule);
}

#[test]
fn from_json_rejects_a_malformed_window() {
    let json = r#"{
        "providerId": "dr-rao",
        "windows": {
            "Tue": { "isWorkingDay": true, "start": "17:00", "end": "09:00", "slotDuration": 30 }
        }
    }"#;
    let err = ProviderSchedule::from_json(json).unwrap_err();
    assert!(matches!(err, ConfigurationError::Schedule(ref msg) if msg.starts_with("Tue window")));
}

#[test]
fn from_json_rejects_bad_time_strings() {
    let json = r#"{ "providerId": "dr-rao", "windows": { "Mon": { "isWorkingDay": true, "start": "9am", "end": "17:00", "slotDuration": 30 } } }"#;
    assert!(matches!(
        ProviderSchedule::from_json(json),
        Err(ConfigurationError::Schedule(_))
    ));
}

#[test]
fn earliest_available_picks_the_first_open_slot_across_providers() {
    let dr_mehta = ProviderSchedule::new("dr-mehta").with_window(
        Weekday::Mon,
        WorkingWindow::new(t("09:00"), t("13:00"), SlotDuration::Min60),
    );
    let appointments = vec![
        appointment("apt-001", "dr-rao", MONDAY, "09:00", "09:30"),
        appointment("apt-002", "dr-mehta", MONDAY, "09:00", "10:00"),
    ];

    let (provider, slot) = earliest_available(&[dr_mehta, dr_rao()], date(MONDAY), &appointments)
        .unwrap()
        .unwrap();
    assert_eq!(provider, "dr-rao");
    assert_eq!(slot.interval, iv("09:30", "10:00"));
}

#[test]
fn earliest_available_is_none_when_nobody_works() {
    assert_eq!(
        earliest_available(&[dr_rao()], date(SUNDAY), &[]).unwrap(),
        None
    );
}
