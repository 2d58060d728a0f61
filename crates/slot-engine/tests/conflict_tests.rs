//! Tests for conflict detection between candidate intervals and bookings.

use slot_engine::{
    find_conflicts, is_available, is_available_excluding, overlaps, Booking, Interval,
};

fn iv(start: &str, end: &str) -> Interval {
    Interval::parse(start, end).unwrap()
}

#[test]
fn back_to_back_is_not_a_conflict() {
    assert!(!overlaps(&iv("09:00", "09:30"), &iv("09:30", "10:00")));
    assert!(!overlaps(&iv("09:30", "10:00"), &iv("09:00", "09:30")));
}

#[test]
fn one_minute_into_the_next_is_a_conflict() {
    assert!(overlaps(&iv("09:00", "09:31"), &iv("09:30", "10:00")));
}

#[test]
fn containment_overlaps_both_ways() {
    let outer = iv("09:00", "12:00");
    let inner = iv("10:00", "11:00");
    assert!(overlaps(&outer, &inner));
    assert!(overlaps(&inner, &outer));
}

#[test]
fn empty_bookings_means_available() {
    assert!(is_available(&iv("09:00", "09:30"), &[]));
}

#[test]
fn booked_interval_makes_candidate_unavailable() {
    let bookings = vec![Booking::booked("apt-001", iv("10:30", "11:00"))];
    assert!(!is_available(&iv("10:30", "11:00"), &bookings));
    assert!(!is_available(&iv("10:45", "11:15"), &bookings));
    assert!(is_available(&iv("11:00", "11:30"), &bookings));
}

#[test]
fn blocked_interval_makes_candidate_unavailable_whatever_the_reason() {
    let bookings = vec![Booking::blocked(iv("13:00", "14:00"), "Staff meeting")];
    assert!(!is_available(&iv("13:30", "14:00"), &bookings));
    assert!(is_available(&iv("14:00", "14:30"), &bookings));
}

#[test]
fn rescheduling_into_own_slot_is_available() {
    let bookings = vec![Booking::booked("apt-001", iv("09:00", "09:30"))];
    let same_slot = iv("09:00", "09:30");

    assert!(!is_available(&same_slot, &bookings));
    assert!(is_available_excluding(&same_slot, &bookings, Some("apt-001")));
}

#[test]
fn exclusion_only_skips_the_named_appointment() {
    let bookings = vec![
        Booking::booked("apt-001", iv("09:00", "09:30")),
        Booking::booked("apt-002", iv("09:15", "09:45")),
        Booking::blocked(iv("09:00", "10:00"), "Ward round"),
    ];

    let conflicts = find_conflicts(&iv("09:00", "09:30"), &bookings, Some("apt-001"));
    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].booking.appointment_id.as_deref(), Some("apt-002"));
    assert_eq!(conflicts[0].overlap_minutes, 15);
    assert!(conflicts[1].booking.is_blocked());
    assert_eq!(conflicts[1].overlap_minutes, 30);
}

#[test]
fn find_conflicts_reports_every_overlap_in_input_order() {
    let bookings = vec![
        Booking::booked("apt-001", iv("08:00", "09:00")),
        Booking::booked("apt-002", iv("09:45", "10:15")),
        Booking::booked("apt-003", iv("10:00", "11:00")),
    ];

    let conflicts = find_conflicts(&iv("09:00", "10:30"), &bookings, None);
    let ids: Vec<_> = conflicts
        .iter()
        .map(|c| c.booking.appointment_id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, ["apt-002", "apt-003"]);
    assert_eq!(conflicts[0].overlap_minutes, 30);
    assert_eq!(conflicts[1].overlap_minutes, 30);
}

// ─────────────────────────────────────────────────────────────────────────────
// Malformed bookings
// ─────────────────────────────────────────────────────────────────────────────

fn zero_length_booking() -> Booking {
    let at: slot_engine::TimeOfDay = "10:15".parse().unwrap();
    Booking::booked("apt-x", Interval { start: at, end: at })
}

#[test]
fn zero_length_booking_occupies_nothing_anywhere() {
    use slot_engine::{
        find_free_periods, generate_slots, validate_booking, SlotDuration, WorkingWindow,
    };

    let window = WorkingWindow::new(
        "10:00".parse().unwrap(),
        "11:00".parse().unwrap(),
        SlotDuration::Min30,
    );
    let bookings = vec![zero_length_booking()];

    let slots = generate_slots(&window, &bookings).unwrap();
    assert!(slots.iter().all(|s| s.available && s.appointment_id.is_none()));

    let free = find_free_periods(&window, &bookings).unwrap();
    let spans: Vec<Interval> = free.iter().map(|p| p.interval).collect();
    assert_eq!(spans, [iv("10:00", "11:00")]);

    assert_eq!(validate_booking(&iv("10:00", "10:30"), &window, &bookings, None), Ok(()));
    assert!(is_available(&iv("10:00", "10:30"), &bookings));
    assert!(find_conflicts(&iv("10:00", "10:30"), &bookings, None).is_empty());
}

#[test]
fn reversed_booking_never_conflicts() {
    let reversed = Booking::booked(
        "apt-y",
        Interval {
            start: "11:00".parse().unwrap(),
            end: "10:00".parse().unwrap(),
        },
    );
    let bookings = vec![reversed, Booking::booked("apt-001", iv("10:30", "11:00"))];

    assert!(is_available(&iv("10:00", "10:30"), &bookings));
    let ids: Vec<_> = find_conflicts(&iv("10:00", "11:00"), &bookings, None)
        .into_iter()
        .map(|c| c.booking.appointment_id)
        .collect();
    assert_eq!(ids, [Some("apt-001".to_string())]);
}
