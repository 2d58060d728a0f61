//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, working-hours validation, conflict checks and
//! free-period computation to the scheduling UI via `wasm-bindgen`. All
//! complex types cross the boundary as JSON strings using the same camelCase
//! shapes the front office already sends (`isWorkingDay`, `slotDuration`,
//! `appointmentId`, ...).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Serialize;
use slot_engine::{Booking, Interval, TimeOfDay, WorkingWindow};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Outcome of a validation call. Rejections are data, not exceptions, so the
/// UI can show the reason next to the form field.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationDto {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn parse_time(s: &str) -> Result<TimeOfDay, JsValue> {
    s.parse().map_err(|e| js_err("Invalid time", e))
}

fn parse_window_json(json: &str) -> Result<WorkingWindow, JsValue> {
    serde_json::from_str(json).map_err(|e| js_err("Invalid working window JSON", e))
}

/// An empty string is treated as "no bookings". Entries whose start is not
/// before their end are rejected.
fn parse_bookings_json(json: &str) -> Result<Vec<Booking>, JsValue> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let bookings: Vec<Booking> =
        serde_json::from_str(json).map_err(|e| js_err("Invalid bookings JSON", e))?;
    if let Some(bad) = bookings.iter().find(|b| !b.interval.is_well_formed()) {
        return Err(js_err(
            "Invalid bookings JSON",
            format!("booking {}-{} must start before it ends", bad.interval.start, bad.interval.end),
        ));
    }
    Ok(bookings)
}

fn parse_candidate(start: &str, end: &str) -> Result<Interval, JsValue> {
    Ok(Interval {
        start: parse_time(start)?,
        end: parse_time(end)?,
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_err("Serialization error", e))
}

fn validation_json(result: Result<(), impl std::fmt::Display>) -> Result<String, JsValue> {
    let dto = match result {
        Ok(()) => ValidationDto {
            valid: true,
            reason: None,
        },
        Err(e) => ValidationDto {
            valid: false,
            reason: Some(e.to_string()),
        },
    };
    to_json(&dto)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the slot grid for one provider-day.
///
/// `window_json` is a working window object; `bookings_json` is a JSON array
/// of `{appointmentId?, start, end, status?, reason?}` objects for that day.
/// Returns a JSON array of `{start, end, available, appointmentId?, blockedReason?}`.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(window_json: &str, bookings_json: &str) -> Result<String, JsValue> {
    let window = parse_window_json(window_json)?;
    let bookings = parse_bookings_json(bookings_json)?;

    let slots = slot_engine::generate_slots(&window, &bookings)
        .map_err(|e| js_err("Invalid working window", e))?;
    to_json(&slots)
}

/// Check a proposed appointment against working hours only.
///
/// Returns `{"valid": true}` or `{"valid": false, "reason": "..."}`.
#[wasm_bindgen(js_name = "validateAppointment")]
pub fn validate_appointment(window_json: &str, start: &str, end: &str) -> Result<String, JsValue> {
    let window = parse_window_json(window_json)?;
    let candidate = parse_candidate(start, end)?;
    validation_json(slot_engine::validate(&candidate, &window))
}

/// Full pre-booking check: working hours, then conflicts with `bookings_json`
/// and the window's break. `exclude_id` names an appointment being moved.
#[wasm_bindgen(js_name = "validateBooking")]
pub fn validate_booking(
    window_json: &str,
    bookings_json: &str,
    start: &str,
    end: &str,
    exclude_id: Option<String>,
) -> Result<String, JsValue> {
    let window = parse_window_json(window_json)?;
    let bookings = parse_bookings_json(bookings_json)?;
    let candidate = parse_candidate(start, end)?;
    validation_json(slot_engine::validate_booking(
        &candidate,
        &window,
        &bookings,
        exclude_id.as_deref(),
    ))
}

/// True when `start`-`end` overlaps none of the bookings, ignoring the one
/// whose appointment id is `exclude_id`.
#[wasm_bindgen(js_name = "isAvailable")]
pub fn is_available(
    start: &str,
    end: &str,
    bookings_json: &str,
    exclude_id: Option<String>,
) -> Result<bool, JsValue> {
    let candidate = parse_candidate(start, end)?;
    let bookings = parse_bookings_json(bookings_json)?;
    Ok(slot_engine::is_available_excluding(
        &candidate,
        &bookings,
        exclude_id.as_deref(),
    ))
}

/// Free stretches of the working day as a JSON array of
/// `{start, end, durationMinutes}` objects.
#[wasm_bindgen(js_name = "findFreePeriods")]
pub fn find_free_periods(window_json: &str, bookings_json: &str) -> Result<String, JsValue> {
    let window = parse_window_json(window_json)?;
    let bookings = parse_bookings_json(bookings_json)?;

    let periods = slot_engine::find_free_periods(&window, &bookings)
        .map_err(|e| js_err("Invalid working window", e))?;
    to_json(&periods)
}
