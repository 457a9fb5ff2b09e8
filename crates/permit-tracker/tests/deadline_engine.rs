use chrono::NaiveDate;
use permit_tracker::deadlines::{
    calculate_deadlines, deadline_status, urgent_deadlines, DeadlineInputs, DeadlineKind,
    DeadlineStatus,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn inputs(submitted_at: Option<NaiveDate>, permit_issued_at: Option<NaiveDate>) -> DeadlineInputs {
    DeadlineInputs {
        submitted_at,
        permit_issued_at,
        last_action_at: None,
    }
}

#[test]
fn submission_only_yields_single_abandonment_deadline() {
    let submitted = date(2024, 8, 15);
    let deadlines = calculate_deadlines(&inputs(Some(submitted), None), date(2024, 9, 1));

    assert_eq!(deadlines.len(), 1);
    assert_eq!(deadlines[0].kind(), DeadlineKind::Abandonment);
    assert_eq!(deadlines[0].date(), submitted + chrono::Duration::days(180));
}

#[test]
fn issuance_yields_single_expiry_deadline_and_suppresses_abandonment() {
    let issued = date(2024, 2, 29);
    for submitted in [None, Some(date(2023, 11, 2))] {
        let deadlines = calculate_deadlines(&inputs(submitted, Some(issued)), date(2024, 3, 1));

        assert_eq!(deadlines.len(), 1);
        assert_eq!(deadlines[0].kind(), DeadlineKind::PermitExpiry);
        assert_eq!(deadlines[0].date(), date(2025, 2, 28));
    }
}

#[test]
fn missing_milestones_yield_nothing() {
    assert!(calculate_deadlines(&inputs(None, None), date(2025, 1, 1)).is_empty());
}

#[test]
fn overdue_and_urgent_flags_follow_the_reference_date() {
    let submitted = date(2025, 1, 1);
    let deadline_date = date(2025, 6, 30);

    for offset in -40..=40 {
        let today = deadline_date + chrono::Duration::days(offset);
        let deadlines = calculate_deadlines(&inputs(Some(submitted), None), today);
        let deadline = &deadlines[0];

        assert_eq!(deadline.days_remaining(), -offset);
        assert_eq!(deadline.is_overdue(), deadline.date() < today);
        assert_eq!(
            deadline.is_urgent(),
            deadline.is_overdue() || deadline.days_remaining() <= 30
        );

        let expected = if deadline.is_overdue() {
            DeadlineStatus::Urgent
        } else if deadline.is_urgent() {
            DeadlineStatus::Warning
        } else {
            DeadlineStatus::Normal
        };
        assert_eq!(deadline_status(deadline), expected);
    }
}

#[test]
fn reference_scenarios_match_county_rules() {
    let fresh = calculate_deadlines(&inputs(Some(date(2025, 1, 1)), None), date(2025, 1, 1));
    assert_eq!(fresh[0].date(), date(2025, 6, 30));
    assert_eq!(fresh[0].days_remaining(), 180);
    assert!(!fresh[0].is_urgent());
    assert!(!fresh[0].is_overdue());

    let expiring = calculate_deadlines(&inputs(None, Some(date(2024, 1, 1))), date(2024, 12, 20));
    assert_eq!(expiring[0].date(), date(2024, 12, 31));
    assert_eq!(expiring[0].days_remaining(), 11);
    assert!(expiring[0].is_urgent());
    assert!(!expiring[0].is_overdue());
    assert!(expiring[0].action_required().contains("extension"));

    let lapsed = calculate_deadlines(&inputs(Some(date(2024, 1, 1)), None), date(2024, 12, 1));
    assert_eq!(lapsed[0].date(), date(2024, 6, 29));
    assert!(lapsed[0].days_remaining() < 0);
    assert!(lapsed[0].is_overdue());
    assert!(lapsed[0].is_urgent());
    assert!(lapsed[0]
        .action_required()
        .starts_with("Contact permit office immediately"));

    let mut combined = Vec::new();
    combined.extend(fresh.iter().cloned());
    combined.extend(expiring.iter().cloned());
    combined.extend(lapsed.iter().cloned());

    let urgent = urgent_deadlines(&combined);
    assert_eq!(urgent, vec![expiring[0].clone(), lapsed[0].clone()]);
}

#[test]
fn output_is_sorted_by_date() {
    let deadlines = calculate_deadlines(
        &inputs(Some(date(2020, 1, 1)), Some(date(2024, 6, 1))),
        date(2024, 7, 1),
    );
    assert!(deadlines
        .windows(2)
        .all(|pair| pair[0].date() <= pair[1].date()));
}
