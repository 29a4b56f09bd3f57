//! Turns a day's opening window, a service duration and the existing
//! bookings into the list of candidate start times.
//!
//! All intervals are half-open `[start, end)`; two intervals overlap when
//! `a.start < b.end && b.start < a.end`. Arithmetic runs on minutes since
//! midnight so nothing wraps past 24:00.
use chrono::{NaiveTime, Timelike};
use models::working_hours;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
    pub lunch: Option<(NaiveTime, NaiveTime)>,
}

impl From<&working_hours::Model> for DayWindow {
    fn from(h: &working_hours::Model) -> Self {
        Self { opens_at: h.opens_at, closes_at: h.closes_at, lunch: h.lunch() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    #[serde(with = "models::hhmm")]
    pub time: NaiveTime,
    pub available: bool,
}

fn minutes(t: NaiveTime) -> i64 {
    i64::from(t.num_seconds_from_midnight() / 60)
}

fn overlaps(a: (i64, i64), b: (i64, i64)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Candidate start times every `step_min` from opening.
///
/// A candidate is listed when the service fits before closing and does not
/// touch the lunch break. It is unavailable when it overlaps one of `booked`
/// (start, duration in minutes) or starts before `not_before`.
pub fn compute_slots(
    day: &DayWindow,
    duration_min: i64,
    step_min: i64,
    booked: &[(NaiveTime, i64)],
    not_before: Option<NaiveTime>,
) -> Vec<Slot> {
    if duration_min <= 0 || step_min <= 0 {
        return Vec::new();
    }
    let open = minutes(day.opens_at);
    let close = minutes(day.closes_at);
    let lunch = day.lunch.map(|(s, e)| (minutes(s), minutes(e)));
    let busy: Vec<(i64, i64)> = booked
        .iter()
        .map(|(start, dur)| (minutes(*start), minutes(*start) + dur))
        .collect();
    let cutoff = not_before.map(minutes);

    let mut slots = Vec::new();
    let mut t = open;
    while t + duration_min <= close {
        let candidate = (t, t + duration_min);
        if !lunch.is_some_and(|l| overlaps(candidate, l)) {
            let taken = busy.iter().any(|b| overlaps(candidate, *b));
            let past = cutoff.is_some_and(|c| t < c);
            if let Some(time) = NaiveTime::from_num_seconds_from_midnight_opt((t * 60) as u32, 0) {
                slots.push(Slot { time, available: !taken && !past });
            }
        }
        t += step_min;
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn shop() -> DayWindow {
        DayWindow { opens_at: hm(9, 0), closes_at: hm(19, 0), lunch: Some((hm(12, 0), hm(13, 0))) }
    }

    fn times(slots: &[Slot]) -> Vec<String> {
        slots.iter().map(|s| s.time.format("%H:%M").to_string()).collect()
    }

    #[test]
    fn half_hour_grid_skips_lunch() {
        let slots = compute_slots(&shop(), 30, 30, &[], None);
        let t = times(&slots);
        assert_eq!(t.first().map(String::as_str), Some("09:00"));
        assert_eq!(t.last().map(String::as_str), Some("18:30"));
        assert!(t.contains(&"11:30".to_string()));
        assert!(!t.contains(&"12:00".to_string()));
        assert!(!t.contains(&"12:30".to_string()));
        assert!(t.contains(&"13:00".to_string()));
        assert_eq!(slots.len(), 18);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn long_services_must_fit_before_lunch_and_closing() {
        let t = times(&compute_slots(&shop(), 50, 30, &[], None));
        assert!(t.contains(&"11:00".to_string()));
        assert!(!t.contains(&"11:30".to_string()));
        assert!(t.contains(&"18:00".to_string()));
        assert!(!t.contains(&"18:30".to_string()));
    }

    #[test]
    fn bookings_block_every_overlapping_start() {
        // 40 minute booking at 10:00 occupies [10:00, 10:40)
        let slots = compute_slots(&shop(), 30, 30, &[(hm(10, 0), 40)], None);
        let unavailable: Vec<_> = slots.iter().filter(|s| !s.available).map(|s| s.time).collect();
        assert_eq!(unavailable, vec![hm(10, 0), hm(10, 30)]);

        // a 30 minute service starting 09:30 ends exactly when the booking begins
        let nine_thirty = slots.iter().find(|s| s.time == hm(9, 30)).unwrap();
        assert!(nine_thirty.available);
    }

    #[test]
    fn longer_candidate_collides_with_later_booking() {
        let slots = compute_slots(&shop(), 50, 30, &[(hm(10, 0), 20)], None);
        let nine_thirty = slots.iter().find(|s| s.time == hm(9, 30)).unwrap();
        assert!(!nine_thirty.available);
        let nine = slots.iter().find(|s| s.time == hm(9, 0)).unwrap();
        assert!(nine.available);
    }

    #[test]
    fn starts_before_cutoff_are_unavailable() {
        let slots = compute_slots(&shop(), 30, 30, &[], Some(hm(15, 10)));
        assert!(slots.iter().filter(|s| s.time <= hm(15, 0)).all(|s| !s.available));
        assert!(slots.iter().filter(|s| s.time >= hm(15, 30)).all(|s| s.available));
    }

    #[test]
    fn degenerate_inputs_yield_nothing() {
        assert!(compute_slots(&shop(), 0, 30, &[], None).is_empty());
        assert!(compute_slots(&shop(), 30, 0, &[], None).is_empty());
        assert!(compute_slots(&shop(), 11 * 60, 30, &[], None).is_empty());
    }

    #[test]
    fn no_lunch_means_continuous_grid() {
        let day = DayWindow { lunch: None, ..shop() };
        assert_eq!(compute_slots(&day, 30, 30, &[], None).len(), 20);
    }

    #[test]
    fn slot_json_uses_hhmm() {
        let s = Slot { time: hm(9, 30), available: true };
        assert_eq!(serde_json::to_value(s).unwrap(), serde_json::json!({"time": "09:30", "available": true}));
    }
}
