use fieldsync_core::errors::DispatchError;
use fieldsync_core::models::time_window::{to_hhmm, to_minutes, TimeWindow};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("00:00", 0)]
#[case("08:30", 510)]
#[case("12:00", 720)]
#[case("23:59", 1439)]
fn test_to_minutes_valid(#[case] input: &str, #[case] expected: u16) {
    assert_eq!(to_minutes(input).unwrap(), expected);
}

#[rstest]
#[case("25:00")]
#[case("08:60")]
#[case("24:00")]
#[case("8:30")]
#[case("08-30")]
#[case("")]
#[case("ab:cd")]
fn test_to_minutes_invalid(#[case] input: &str) {
    let err = to_minutes(input).unwrap_err();
    assert!(matches!(err, DispatchError::InvalidTimeFormat(_)));
    assert!(err.to_string().contains(input));
}

#[test]
fn test_to_hhmm_round_trip() {
    assert_eq!(to_hhmm(510), "08:30");
    assert_eq!(to_hhmm(0), "00:00");
    assert_eq!(to_hhmm(1439), "23:59");
    assert_eq!(to_minutes(&to_hhmm(975)).unwrap(), 975);
}

#[test]
fn test_window_new_rejects_inverted() {
    let err = TimeWindow::new(600, 480).unwrap_err();
    assert!(matches!(err, DispatchError::Validation(_)));

    let err = TimeWindow::new(600, 600).unwrap_err();
    assert!(matches!(err, DispatchError::Validation(_)));
}

#[test]
fn test_window_from_strings() {
    let window = TimeWindow::from_strings("08:00", "10:00").unwrap();
    assert_eq!(window.start, 480);
    assert_eq!(window.end, 600);

    assert!(TimeWindow::from_strings("10:00", "08:00").is_err());
    assert!(TimeWindow::from_strings("25:00", "26:00").is_err());
}

#[rstest]
// Slot strictly inside working hours
#[case((480, 1080), (480, 600), true)]
// Exact boundary equality on both ends is accepted
#[case((480, 600), (480, 600), true)]
// Slot starts before working hours
#[case((540, 1020), (480, 600), false)]
// Slot ends after working hours
#[case((480, 1020), (960, 1080), false)]
// Slot fully outside
#[case((480, 600), (600, 720), false)]
fn test_contains(
    #[case] outer: (u16, u16),
    #[case] inner: (u16, u16),
    #[case] expected: bool,
) {
    let outer = TimeWindow {
        start: outer.0,
        end: outer.1,
    };
    let inner = TimeWindow {
        start: inner.0,
        end: inner.1,
    };
    assert_eq!(outer.contains(inner), expected);
}

#[test]
fn test_has_ended_is_strict() {
    let window = TimeWindow { start: 480, end: 600 };

    // 10:00 exactly: not yet ended
    assert!(!window.has_ended(600));
    // 10:01: ended
    assert!(window.has_ended(601));
    // mid-window
    assert!(!window.has_ended(540));
}

#[test]
fn test_display_format() {
    let window = TimeWindow { start: 480, end: 600 };
    assert_eq!(window.to_string(), "08:00-10:00");
}
