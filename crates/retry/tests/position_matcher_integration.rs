//! Integration tests for position matching
//!
//! Checks the matcher rules over many sequence sizes and shows how a caller
//! uses them to pick which attempts of a retry loop to report.

use steadfast_retry::{PositionMatcher, RetryStrategyFactory};

const SIZES: std::ops::RangeInclusive<usize> = 1..=64;

fn selected(matcher: PositionMatcher, size: usize) -> Vec<usize> {
    (0..size).filter(|&index| matcher.is_match(index, size)).collect()
}

/// Ensures each matcher selects exactly the positions it names for every
/// size.
#[test]
fn test_selected_positions_per_matcher() {
    for size in SIZES {
        let last = size - 1;

        assert_eq!(selected(PositionMatcher::FirstOnly, size), vec![0]);
        assert_eq!(selected(PositionMatcher::LastOnly, size), vec![last]);
        assert_eq!(selected(PositionMatcher::All, size), (0..size).collect::<Vec<_>>());

        let expected = if size == 1 { vec![0] } else { vec![0, last] };
        assert_eq!(selected(PositionMatcher::FirstAndLastOnly, size), expected);
    }
}

/// Validates that `FirstAndLastOnly` is the union of the two single-ended
/// matchers on every valid input.
#[test]
fn test_first_and_last_is_union_over_all_sizes() {
    for size in SIZES {
        for index in 0..size {
            assert_eq!(
                PositionMatcher::FirstAndLastOnly.is_match(index, size),
                PositionMatcher::FirstOnly.is_match(index, size)
                    || PositionMatcher::LastOnly.is_match(index, size),
                "index {index} of {size}"
            );
        }
    }
}

/// Confirms matchers are pure: repeated evaluation never changes the answer.
#[test]
fn test_matching_is_stable() {
    for matcher in PositionMatcher::ALL_VARIANTS {
        let first_pass = selected(matcher, 10);
        let second_pass = selected(matcher, 10);
        assert_eq!(first_pass, second_pass, "{matcher}");
    }
}

/// Verifies the matcher lines up with a factory's attempt count, so the
/// last matched index is the final attempt of an exhausted call.
#[test]
fn test_matcher_sized_by_factory_attempts() {
    let factory = RetryStrategyFactory::builder().max_retry_count(4).build();
    let size = usize::try_from(factory.max_attempts()).expect("small attempt count");

    assert_eq!(selected(PositionMatcher::LastOnly, size), vec![4]);
    assert_eq!(selected(PositionMatcher::FirstAndLastOnly, size), vec![0, 4]);
}

/// Ensures every matcher name round-trips through `Display` and `FromStr`.
#[test]
fn test_names_round_trip() {
    let names: Vec<String> =
        PositionMatcher::ALL_VARIANTS.iter().map(ToString::to_string).collect();

    assert_eq!(names, ["first_only", "last_only", "first_and_last_only", "all"]);
    for (name, matcher) in names.iter().zip(PositionMatcher::ALL_VARIANTS) {
        assert_eq!(name.parse::<PositionMatcher>().ok(), Some(matcher));
    }
    assert!(" LAST_ONLY ".parse::<PositionMatcher>().is_ok());
    assert!("".parse::<PositionMatcher>().is_err());
}
