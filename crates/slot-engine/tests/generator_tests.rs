//! Tests for slot generation over a working window.

use slot_engine::{
    available_slots, generate_slots, Booking, ConfigurationError, Interval, SlotDuration,
    TimeOfDay, WorkingWindow,
};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn iv(start: &str, end: &str) -> Interval {
    Interval::parse(start, end).unwrap()
}

fn window(start: &str, end: &str, duration: SlotDuration) -> WorkingWindow {
    WorkingWindow::new(t(start), t(end), duration)
}

#[test]
fn full_day_with_break_and_one_booking() {
    // 09:00-17:00 in 30-min slots, lunch 13:00-14:00, apt-001 at 10:30.
    let w = window("09:00", "17:00", SlotDuration::Min30).with_break(iv("13:00", "14:00"));
    let bookings = vec![Booking::booked("apt-001", iv("10:30", "11:00"))];

    let slots = generate_slots(&w, &bookings).unwrap();

    assert_eq!(slots.len(), 16, "(17:00 - 09:00) / 30 = 16 slots in the grid");

    let booked = slots.iter().find(|s| s.interval == iv("10:30", "11:00")).unwrap();
    assert!(!booked.available);
    assert_eq!(booked.appointment_id.as_deref(), Some("apt-001"));

    let lunch: Vec<_> = slots
        .iter()
        .filter(|s| s.blocked_reason.as_deref() == Some("Break"))
        .collect();
    assert_eq!(lunch.len(), 2);
    assert_eq!(lunch[0].interval, iv("13:00", "13:30"));
    assert_eq!(lunch[1].interval, iv("13:30", "14:00"));
    assert!(lunch.iter().all(|s| !s.available));

    let outside_break = slots.iter().filter(|s| s.blocked_reason.is_none()).count();
    assert_eq!(outside_break, 14);
    assert_eq!(slots.iter().filter(|s| s.available).count(), 13);
}

#[test]
fn slots_are_contiguous_and_sorted() {
    let w = window("08:00", "12:00", SlotDuration::Min45);
    let slots = generate_slots(&w, &[]).unwrap();

    assert_eq!(slots.first().unwrap().interval.start, t("08:00"));
    for pair in slots.windows(2) {
        assert_eq!(pair[0].interval.end, pair[1].interval.start);
    }
}

#[test]
fn trailing_partial_slot_is_dropped() {
    // 240 / 45 = 5 whole slots ending 11:45; the last 15 minutes go unused.
    let w = window("08:00", "12:00", SlotDuration::Min45);
    let slots = generate_slots(&w, &[]).unwrap();

    assert_eq!(slots.len(), 5);
    assert_eq!(slots.last().unwrap().interval, iv("11:00", "11:45"));
}

#[test]
fn window_shorter_than_one_slot_yields_nothing() {
    let w = window("09:00", "10:00", SlotDuration::Min90);
    assert!(generate_slots(&w, &[]).unwrap().is_empty());
}

#[test]
fn non_working_day_yields_nothing_even_if_malformed() {
    let mut w = window("17:00", "09:00", SlotDuration::Min30);
    w.is_working_day = false;
    w.slot_duration = 0;

    assert_eq!(generate_slots(&w, &[]), Ok(vec![]));
}

#[test]
fn zero_duration_is_a_configuration_error() {
    let mut w = window("09:00", "17:00", SlotDuration::Min30);
    w.slot_duration = 0;

    assert_eq!(
        generate_slots(&w, &[]),
        Err(ConfigurationError::NonPositiveDuration)
    );
}

#[test]
fn reversed_window_is_a_configuration_error() {
    let w = window("17:00", "09:00", SlotDuration::Min30);
    assert!(matches!(
        generate_slots(&w, &[]),
        Err(ConfigurationError::InvalidWindow { .. })
    ));
}

#[test]
fn half_configured_break_is_a_configuration_error() {
    let mut w = window("09:00", "17:00", SlotDuration::Min30);
    w.break_start = Some(t("13:00"));

    assert_eq!(generate_slots(&w, &[]), Err(ConfigurationError::IncompleteBreak));
}

#[test]
fn break_outside_window_is_a_configuration_error() {
    let w = window("09:00", "12:00", SlotDuration::Min30).with_break(iv("12:00", "13:00"));
    assert!(matches!(
        generate_slots(&w, &[]),
        Err(ConfigurationError::BreakOutsideWindow { .. })
    ));
}

#[test]
fn non_standard_duration_still_generates() {
    let mut w = window("09:00", "10:00", SlotDuration::Min30);
    w.slot_duration = 20;

    let slots = generate_slots(&w, &[]).unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(w.standard_duration(), None);
}

#[test]
fn booking_straddling_two_slots_blocks_both() {
    let w = window("09:00", "11:00", SlotDuration::Min30);
    let bookings = vec![Booking::booked("apt-007", iv("09:15", "09:45"))];

    let slots = generate_slots(&w, &bookings).unwrap();
    let taken: Vec<_> = slots.iter().filter(|s| !s.available).map(|s| s.interval).collect();
    assert_eq!(taken, [iv("09:00", "09:30"), iv("09:30", "10:00")]);
}

#[test]
fn blocked_booking_reason_is_carried_to_the_slot() {
    let w = window("09:00", "11:00", SlotDuration::Min60);
    let bookings = vec![Booking::blocked(iv("10:00", "11:00"), "Ward round")];

    let slots = generate_slots(&w, &bookings).unwrap();
    assert!(slots[0].available);
    assert_eq!(slots[1].blocked_reason.as_deref(), Some("Ward round"));
    assert_eq!(slots[1].appointment_id, None);
}

#[test]
fn available_slots_filters_taken_ones() {
    let w = window("09:00", "10:00", SlotDuration::Min15);
    let bookings = vec![Booking::booked("apt-001", iv("09:15", "09:30"))];

    let open = available_slots(&w, &bookings).unwrap();
    let starts: Vec<String> = open.iter().map(|s| s.interval.start.to_string()).collect();
    assert_eq!(starts, ["09:00", "09:30", "09:45"]);
}

#[test]
fn generation_is_repeatable() {
    let w = window("09:00", "17:00", SlotDuration::Min30).with_break(iv("13:00", "14:00"));
    let bookings = vec![Booking::booked("apt-001", iv("10:30", "11:00"))];

    assert_eq!(generate_slots(&w, &bookings), generate_slots(&w, &bookings));
}

#[test]
fn window_deserializes_from_front_office_payload() {
    let json = r#"{
        "isWorkingDay": true,
        "start": "9:00",
        "end": "13:00",
        "breakStart": "11:00",
        "breakEnd": "11:30",
        "slotDuration": 30
    }"#;
    let w: WorkingWindow = serde_json::from_str(json).unwrap();

    assert_eq!(w.break_interval(), Some(iv("11:00", "11:30")));
    assert_eq!(w.standard_duration(), Some(SlotDuration::Min30));
    assert_eq!(generate_slots(&w, &[]).unwrap().len(), 8);
}
