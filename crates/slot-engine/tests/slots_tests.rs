//! Tests for candidate grid and available slot generation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slot_engine::{
    AvailableSlotsQuery, BusinessRules, ConflictEvaluator, ExistingAppointment, FixedClock,
    InMemoryAppointments, ServiceType, SlotGenerator, UserId,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monday 2026-03-16, a regular trading day.
fn monday() -> NaiveDate {
    date(2026, 3, 16)
}

fn at(d: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    d.and_time(t(h, m))
}

fn booked(id: u64, h: u32, m: u32, service: ServiceType) -> ExistingAppointment {
    ExistingAppointment {
        id,
        date: monday(),
        time: t(h, m),
        service,
        owner: UserId::new(format!("customer-{}", id)),
    }
}

fn generator(
    appointments: Vec<ExistingAppointment>,
    now: NaiveDateTime,
) -> SlotGenerator<InMemoryAppointments, FixedClock> {
    let evaluator = ConflictEvaluator::new(InMemoryAppointments::new(appointments), FixedClock(now));
    SlotGenerator::new(evaluator)
}

/// A generator whose clock sits the week before `monday()`.
fn fresh(appointments: Vec<ExistingAppointment>) -> SlotGenerator<InMemoryAppointments, FixedClock> {
    generator(appointments, at(date(2026, 3, 10), 8, 0))
}

fn grid(from: NaiveTime, to: NaiveTime) -> Vec<NaiveTime> {
    let mut out = Vec::new();
    let mut cursor = from;
    while cursor <= to {
        out.push(cursor);
        cursor += chrono::Duration::minutes(30);
    }
    out
}

// ── Candidate grid ──────────────────────────────────────────────────────────

#[test]
fn single_service_grid_ends_half_hour_before_closing() {
    let gen = fresh(vec![]);
    for service in [ServiceType::Hair, ServiceType::Beard] {
        let slots = gen.candidate_slots(monday(), service);
        assert_eq!(slots, grid(t(9, 0), t(18, 30)), "{} grid", service);
        assert_eq!(slots.len(), 20);
    }
}

#[test]
fn combo_grid_ends_an_hour_before_closing() {
    let gen = fresh(vec![]);
    let slots = gen.candidate_slots(monday(), ServiceType::HairAndBeard);
    assert_eq!(slots, grid(t(9, 0), t(18, 0)));
}

#[test]
fn closed_day_has_no_candidates() {
    let gen = fresh(vec![]);
    let sunday = date(2026, 3, 15);
    assert!(gen.candidate_slots(sunday, ServiceType::Hair).is_empty());
    assert!(gen.available_slots(sunday, ServiceType::HairAndBeard).unwrap().is_empty());
}

#[test]
fn past_date_has_no_candidates() {
    let gen = generator(vec![], at(date(2026, 3, 17), 8, 0));
    assert!(gen.available_slots(monday(), ServiceType::Hair).unwrap().is_empty());
}

// ── Single-service availability ─────────────────────────────────────────────

#[test]
fn empty_day_offers_whole_grid() {
    let gen = fresh(vec![]);
    let slots = gen.available_slots(monday(), ServiceType::Beard).unwrap();
    assert_eq!(slots, grid(t(9, 0), t(18, 30)));
}

#[test]
fn booked_slot_removed_but_neighbours_kept() {
    let gen = fresh(vec![booked(1, 10, 0, ServiceType::Hair)]);
    let slots = gen.available_slots(monday(), ServiceType::Hair).unwrap();

    assert!(!slots.contains(&t(10, 0)));
    assert!(slots.contains(&t(9, 30)), "09:30 ends exactly when 10:00 starts");
    assert!(slots.contains(&t(10, 30)), "10:30 starts exactly when 10:00 ends");
    assert_eq!(slots.len(), 19);
}

#[test]
fn combo_booking_blocks_both_halves_for_single_services() {
    let gen = fresh(vec![booked(1, 11, 0, ServiceType::HairAndBeard)]);
    let slots = gen.available_slots(monday(), ServiceType::Beard).unwrap();

    assert!(!slots.contains(&t(11, 0)));
    assert!(!slots.contains(&t(11, 30)));
    assert!(slots.contains(&t(10, 30)));
    assert!(slots.contains(&t(12, 0)));
}

#[test]
fn any_service_blocks_the_single_chair() {
    let gen = fresh(vec![booked(1, 14, 0, ServiceType::Beard)]);
    let slots = gen.available_slots(monday(), ServiceType::Hair).unwrap();
    assert!(!slots.contains(&t(14, 0)));
}

// ── Combo availability ──────────────────────────────────────────────────────

#[test]
fn combo_on_empty_day_includes_nine_and_closing_edge() {
    let gen = fresh(vec![]);
    let slots = gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap();

    assert_eq!(slots.first(), Some(&t(9, 0)));
    assert_eq!(slots.last(), Some(&t(18, 0)));
    assert_eq!(slots, grid(t(9, 0), t(18, 0)));
}

#[test]
fn combo_excluded_when_hair_then_beard_booked() {
    let gen = fresh(vec![
        booked(1, 9, 0, ServiceType::Hair),
        booked(2, 9, 30, ServiceType::Beard),
    ]);
    let slots = gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap();

    assert!(!slots.contains(&t(9, 0)));
    assert!(!slots.contains(&t(9, 30)));
    assert_eq!(slots.first(), Some(&t(10, 0)));
}

#[test]
fn combo_needs_second_half_free() {
    let gen = fresh(vec![booked(1, 10, 0, ServiceType::Hair)]);
    let slots = gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap();

    assert!(slots.contains(&t(9, 0)), "09:00-10:00 ends as the booking starts");
    assert!(!slots.contains(&t(9, 30)), "second half 10:00 is taken");
    assert!(!slots.contains(&t(10, 0)));
    assert!(slots.contains(&t(10, 30)));
}

#[test]
fn closing_edge_dropped_when_last_half_hour_taken() {
    let gen = fresh(vec![booked(1, 18, 30, ServiceType::Beard)]);
    let slots = gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap();

    assert!(!slots.contains(&t(18, 0)));
    assert_eq!(slots.last(), Some(&t(17, 30)));
}

#[test]
fn closing_edge_dropped_when_its_first_half_taken() {
    let gen = fresh(vec![booked(1, 18, 0, ServiceType::Hair)]);
    let slots = gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap();

    assert!(!slots.contains(&t(18, 0)));
    assert!(!slots.contains(&t(17, 30)));
    assert_eq!(slots.last(), Some(&t(17, 0)));
}

#[test]
fn closing_edge_kept_after_back_to_back_combo() {
    let gen = fresh(vec![booked(1, 17, 0, ServiceType::HairAndBeard)]);
    let slots = gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap();

    assert!(slots.contains(&t(16, 0)));
    assert!(!slots.contains(&t(16, 30)));
    assert!(!slots.contains(&t(17, 30)));
    assert_eq!(slots.last(), Some(&t(18, 0)));
}

#[test]
fn combo_slots_are_strictly_ascending() {
    let gen = fresh(vec![
        booked(1, 12, 0, ServiceType::Hair),
        booked(2, 15, 30, ServiceType::HairAndBeard),
    ]);
    let slots = gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap();
    assert!(slots.windows(2).all(|w| w[0] < w[1]));
}

// ── Today trimming ──────────────────────────────────────────────────────────

#[test]
fn today_drops_slots_at_or_before_now() {
    let gen = generator(vec![], at(monday(), 12, 30));
    let slots = gen.available_slots(monday(), ServiceType::Hair).unwrap();

    assert_eq!(slots.first(), Some(&t(13, 0)), "12:30 is not strictly after now");
    assert!(slots.iter().all(|s| monday().and_time(*s) > at(monday(), 12, 30)));
}

#[test]
fn today_mid_slot_rounds_up_to_next_grid_point() {
    let gen = generator(vec![], at(monday(), 12, 10));
    let slots = gen.available_slots(monday(), ServiceType::Beard).unwrap();
    assert_eq!(slots.first(), Some(&t(12, 30)));
}

#[test]
fn today_late_evening_trims_closing_edge_too() {
    let gen = generator(vec![], at(monday(), 18, 5));

    assert!(gen
        .available_slots(monday(), ServiceType::HairAndBeard)
        .unwrap()
        .is_empty());
    assert_eq!(
        gen.available_slots(monday(), ServiceType::Hair).unwrap(),
        vec![t(18, 30)]
    );
}

#[test]
fn today_does_not_affect_tomorrow() {
    let gen = generator(vec![], at(date(2026, 3, 15), 23, 0));
    assert_eq!(
        gen.available_slots(monday(), ServiceType::Hair).unwrap().len(),
        20
    );
}

// ── Queries, idempotence, next available ────────────────────────────────────

#[test]
fn repeated_queries_are_identical() {
    let gen = fresh(vec![
        booked(1, 9, 30, ServiceType::Beard),
        booked(2, 13, 0, ServiceType::HairAndBeard),
    ]);
    for service in ServiceType::ALL {
        let first = gen.available_slots(monday(), service).unwrap();
        let second = gen.available_slots(monday(), service).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn query_struct_matches_direct_call() {
    let gen = fresh(vec![booked(1, 9, 0, ServiceType::Hair)]);
    let query = AvailableSlotsQuery {
        date: monday(),
        service: ServiceType::HairAndBeard,
    };
    assert_eq!(
        gen.available(&query).unwrap(),
        gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap()
    );
}

#[test]
fn next_available_skips_closed_sunday() {
    // Saturday evening after the last slot.
    let gen = generator(vec![], at(date(2026, 3, 14), 18, 45));
    let next = gen.next_available(date(2026, 3, 14), ServiceType::Hair).unwrap();
    assert_eq!(next, Some((monday(), t(9, 0))));
}

#[test]
fn next_available_finds_gap_in_busy_morning() {
    let gen = fresh(vec![
        booked(1, 9, 0, ServiceType::HairAndBeard),
        booked(2, 10, 0, ServiceType::Hair),
    ]);
    let next = gen.next_available(monday(), ServiceType::HairAndBeard).unwrap();
    assert_eq!(next, Some((monday(), t(10, 30))));
}

#[test]
fn next_available_none_past_horizon() {
    let gen = fresh(vec![]);
    let beyond = date(2026, 5, 1);
    assert_eq!(gen.next_available(beyond, ServiceType::Beard).unwrap(), None);
}

// ── Custom rules ────────────────────────────────────────────────────────────

#[test]
fn earlier_closing_moves_last_slots_and_combo_edge() {
    let rules = BusinessRules {
        closing: t(18, 0),
        ..BusinessRules::default()
    };
    let evaluator = ConflictEvaluator::with_rules(
        InMemoryAppointments::default(),
        FixedClock(at(date(2026, 3, 10), 8, 0)),
        rules,
    )
    .unwrap();
    let gen = SlotGenerator::new(evaluator);

    assert_eq!(
        gen.available_slots(monday(), ServiceType::Hair).unwrap().last(),
        Some(&t(17, 30))
    );
    assert_eq!(
        gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap().last(),
        Some(&t(17, 0))
    );
}

#[test]
fn quarter_hour_step_pairs_halves_half_an_hour_apart() {
    let rules = BusinessRules {
        slot_step_minutes: 15,
        ..BusinessRules::default()
    };
    let appointments = InMemoryAppointments::new(vec![booked(1, 10, 0, ServiceType::Hair)]);
    let evaluator =
        ConflictEvaluator::with_rules(appointments, FixedClock(at(date(2026, 3, 10), 8, 0)), rules)
            .unwrap();
    let gen = SlotGenerator::new(evaluator);
    let slots = gen.available_slots(monday(), ServiceType::HairAndBeard).unwrap();

    assert!(slots.contains(&t(9, 0)));
    assert!(!slots.contains(&t(9, 15)));
    assert!(slots.contains(&t(10, 30)));
    assert!(slots.contains(&t(17, 45)));
    assert_eq!(slots.last(), Some(&t(18, 0)));
}
