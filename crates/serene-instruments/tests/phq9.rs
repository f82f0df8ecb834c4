use serde_json::json;

use serene_core::models::assessment::{Advisory, RiskLevel, SeverityLevel};
use serene_instruments::scoring::{self, Phq9Answers, ValidationError, grade, risk_level};
use serene_instruments::{all_instruments, get_instrument};

fn fixed_instant() -> jiff::Timestamp {
    "2026-03-01T08:30:00Z".parse().unwrap()
}

/// Spread `total` over items 1–8 so item 9 stays at zero.
fn answers_with_total(total: i64) -> Vec<i64> {
    let mut answers = vec![0i64; 9];
    let mut remaining = total;
    for slot in answers.iter_mut().take(8) {
        let take = remaining.min(3);
        *slot = take;
        remaining -= take;
    }
    answers[8] = remaining;
    answers
}

#[test]
fn band_boundaries() {
    let cases = [
        (0, SeverityLevel::NoneMinimal),
        (4, SeverityLevel::NoneMinimal),
        (5, SeverityLevel::Mild),
        (9, SeverityLevel::Mild),
        (10, SeverityLevel::Moderate),
        (14, SeverityLevel::Moderate),
        (15, SeverityLevel::ModeratelySevere),
        (19, SeverityLevel::ModeratelySevere),
        (20, SeverityLevel::Severe),
        (27, SeverityLevel::Severe),
    ];
    for (total, expected) in cases {
        assert_eq!(grade(total), expected, "total {total}");
    }
}

#[test]
fn scored_total_matches_sum_at_every_boundary() {
    for total in [4, 5, 9, 10, 14, 15, 19, 20, 24] {
        let raw = answers_with_total(total);
        let result = scoring::score(&raw, &Advisory::default()).unwrap();
        assert_eq!(i64::from(result.total), raw.iter().sum::<i64>());
        assert_eq!(result.level, grade(result.total));
        assert!(!result.crisis, "item 9 is zero for total {total}");
    }
}

#[test]
fn maximum_score_is_severe_and_crisis() {
    let result = scoring::score(&[3; 9], &Advisory::default()).unwrap();
    assert_eq!(result.total, 27);
    assert_eq!(result.level, SeverityLevel::Severe);
    assert!(result.crisis);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn item_nine_alone_raises_crisis() {
    let answers = Phq9Answers::try_from([0i64, 0, 0, 0, 0, 0, 0, 0, 1].as_slice()).unwrap();
    let result = scoring::score_at(&answers, &Advisory::default(), fixed_instant());
    assert_eq!(result.total, 1);
    assert_eq!(result.level, SeverityLevel::NoneMinimal);
    assert!(result.crisis);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn crisis_overrides_low_total() {
    let result = scoring::score(&[0, 0, 0, 0, 0, 0, 0, 0, 3], &Advisory::default()).unwrap();
    assert_eq!(result.total, 3);
    assert!(result.crisis);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn high_total_without_item_nine_is_moderate_risk() {
    let result = scoring::score(&[3, 3, 3, 3, 3, 2, 0, 0, 0], &Advisory::default()).unwrap();
    assert_eq!(result.total, 17);
    assert_eq!(result.level, SeverityLevel::ModeratelySevere);
    assert!(!result.crisis);
    assert_eq!(result.risk_level, RiskLevel::Moderate);
}

#[test]
fn risk_precedence_table() {
    assert_eq!(risk_level(false, 0), RiskLevel::Low);
    assert_eq!(risk_level(false, 14), RiskLevel::Low);
    assert_eq!(risk_level(false, 15), RiskLevel::Moderate);
    assert_eq!(risk_level(false, 27), RiskLevel::Moderate);
    assert_eq!(risk_level(true, 0), RiskLevel::High);
    assert_eq!(risk_level(true, 27), RiskLevel::High);
}

#[test]
fn wrong_length_is_rejected() {
    for len in [0usize, 8, 10] {
        let raw = vec![0i64; len];
        assert_eq!(
            scoring::score(&raw, &Advisory::default()),
            Err(ValidationError::WrongLength {
                expected: 9,
                actual: len
            })
        );
    }
}

#[test]
fn out_of_range_values_are_rejected_not_clamped() {
    let err = scoring::score(&[0, 0, 4, 0, 0, 0, 0, 0, 0], &Advisory::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::OutOfRange {
            index: 2,
            value: 4,
            min: 0,
            max: 3
        }
    );

    let err = scoring::score(&[0, 0, 0, 0, 0, 0, 0, 0, -1], &Advisory::default()).unwrap_err();
    assert!(matches!(err, ValidationError::OutOfRange { index: 8, value: -1, .. }));
}

#[test]
fn json_coercion_accepts_integer_like_values() {
    let values = vec![
        json!(1),
        json!("2"),
        json!(" 3 "),
        json!(0.0),
        json!(1),
        json!(0),
        json!(0),
        json!(0),
        json!(0),
    ];
    let answers = Phq9Answers::from_json(&values).unwrap();
    assert_eq!(answers.as_array(), [1, 2, 3, 0, 1, 0, 0, 0, 0]);
    assert_eq!(answers.total(), 7);
}

#[test]
fn json_coercion_rejects_non_integers() {
    for bad in [json!("two"), json!(2.5), json!(true), json!(null), json!([1])] {
        let mut values = vec![json!(0); 9];
        values[4] = bad.clone();
        let err = Phq9Answers::from_json(&values).unwrap_err();
        assert!(
            matches!(err, ValidationError::NotAnInteger { index: 4, .. }),
            "{bad} should be rejected, got {err:?}"
        );
    }
}

#[test]
fn json_numbers_beyond_i64_keep_their_submitted_text() {
    for (huge, text) in [
        (json!(u64::MAX), "18446744073709551615"),
        (json!(1e30), "1e30"),
    ] {
        let mut values = vec![json!(0); 9];
        values[2] = huge;
        let err = Phq9Answers::from_json(&values).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotAnInteger {
                index: 2,
                value: text.to_string(),
            }
        );
    }
}

#[test]
fn json_non_integer_reported_before_out_of_range() {
    let mut values = vec![json!(0); 9];
    values[1] = json!(7);
    values[6] = json!("x");
    let err = Phq9Answers::from_json(&values).unwrap_err();
    assert!(matches!(err, ValidationError::NotAnInteger { index: 6, .. }));
}

#[test]
fn json_wrong_length_is_rejected() {
    let values = vec![json!(0); 8];
    assert_eq!(
        Phq9Answers::from_json(&values),
        Err(ValidationError::WrongLength {
            expected: 9,
            actual: 8
        })
    );
}

#[test]
fn result_carries_advisory_and_timestamp() {
    let advisory = Advisory {
        summary: "custom".to_string(),
        recommendations: vec!["walk".to_string()],
    };
    let answers = Phq9Answers::try_from([1i64; 9].as_slice()).unwrap();
    let result = scoring::score_at(&answers, &advisory, fixed_instant());
    assert_eq!(result.advisory, advisory);
    assert_eq!(result.at, fixed_instant());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["level"], "mild");
    assert_eq!(json["risk_level"], "high");
    assert_eq!(json["at"], "2026-03-01T08:30:00Z");
}

#[test]
fn registry_exposes_phq9() {
    let ids: Vec<String> = all_instruments().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec!["phq9".to_string()]);

    let phq9 = get_instrument("phq9").unwrap();
    assert_eq!(phq9.name(), "PHQ-9");
    assert_eq!(phq9.items().len(), 9);
    assert_eq!(phq9.items()[8].id, "self_harm");
    assert!(get_instrument("gad7").is_none());
}
