//! Tests for pagination module

use super::*;
use proptest::prelude::*;
use test_case::test_case;

fn size(n: usize) -> PageSize {
    PageSize::new(n).unwrap()
}

fn numbers(n: usize) -> Vec<usize> {
    (0..n).collect()
}

// ============================================================================
// PageSize Tests
// ============================================================================

#[test]
fn test_page_size_default() {
    assert_eq!(PageSize::default().get(), RECORDS_PER_PAGE);
    assert_eq!(RECORDS_PER_PAGE, 5);
}

#[test]
fn test_page_size_rejects_zero() {
    let err = PageSize::new(0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid value for `page_size`: must be greater than zero"
    );
}

#[test]
fn test_page_size_serde() {
    let parsed: PageSize = serde_json::from_str("10").unwrap();
    assert_eq!(parsed.get(), 10);
    assert_eq!(serde_json::to_string(&parsed).unwrap(), "10");
    assert!(serde_json::from_str::<PageSize>("0").is_err());
}

// ============================================================================
// total_pages Tests
// ============================================================================

#[test_case(0, 5 => 1; "empty dataset still has one page")]
#[test_case(1, 5 => 1; "single record")]
#[test_case(5, 5 => 1; "exactly one full page")]
#[test_case(6, 5 => 2; "one record spills over")]
#[test_case(12, 5 => 3; "partial last page")]
#[test_case(15, 5 => 3; "exact multiple")]
#[test_case(7, 1 => 7; "page size one")]
#[test_case(3, 100 => 1; "page size larger than dataset")]
fn test_total_pages(len: usize, page_size: usize) -> usize {
    total_pages(len, size(page_size))
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_state_starts_on_page_one() {
    let state = PaginationState::new(PageSize::default());
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.total_pages(), 1);
    assert_eq!(state.dataset_len(), 0);
    assert!(!state.has_previous());
    assert!(!state.has_next());
}

#[test]
fn test_go_to_previous_is_noop_on_first_page() {
    let mut state = PaginationState::with_len(size(5), 12);
    let before = state.clone();

    assert_eq!(state.go_to_previous(), 1);
    assert_eq!(state, before);
}

#[test]
fn test_go_to_next_is_noop_on_last_page() {
    let mut state = PaginationState::with_len(size(5), 12);
    state.go_to_next();
    state.go_to_next();
    assert_eq!(state.current_page(), 3);

    let before = state.clone();
    assert_eq!(state.go_to_next(), 3);
    assert_eq!(state, before);
    assert!(!state.has_next());
}

#[test]
fn test_navigation_round_trip() {
    let mut state = PaginationState::with_len(size(5), 12);

    assert_eq!(state.go_to_next(), 2);
    assert!(state.has_previous());
    assert!(state.has_next());
    assert_eq!(state.go_to_next(), 3);
    assert_eq!(state.go_to_previous(), 2);
    assert_eq!(state.go_to_previous(), 1);
    assert_eq!(state.go_to_previous(), 1);
}

#[test]
fn test_go_to_next_within_respects_given_bound() {
    let mut state = PaginationState::with_len(size(5), 50);

    assert_eq!(state.go_to_next_within(2), 2);
    assert_eq!(state.go_to_next_within(2), 2);
}

#[test]
fn test_go_to_next_within_never_exceeds_dataset() {
    let mut state = PaginationState::with_len(size(5), 6);

    state.go_to_next_within(10);
    state.go_to_next_within(10);
    assert_eq!(state.current_page(), 2);
    assert_eq!(state.total_pages(), 2);
}

#[test]
fn test_empty_dataset_controls_are_inert() {
    let mut state = PaginationState::new(size(5));

    assert_eq!(state.go_to_next(), 1);
    assert_eq!(state.go_to_previous(), 1);
    assert_eq!(state.total_pages(), 1);
}

#[test]
fn test_clamp_to_bounds() {
    let mut state = PaginationState::with_len(size(5), 30);
    for _ in 0..5 {
        state.go_to_next();
    }
    assert_eq!(state.current_page(), 6);

    state.clamp_to_bounds(4);
    assert_eq!(state.current_page(), 4);

    state.clamp_to_bounds(0);
    assert_eq!(state.current_page(), 1);
}

#[test]
fn test_clamp_to_bounds_leaves_valid_page_alone() {
    let mut state = PaginationState::with_len(size(5), 30);
    state.go_to_next();

    state.clamp_to_bounds(6);
    assert_eq!(state.current_page(), 2);
}

#[test]
fn test_resize_shrinks_current_page() {
    let mut state = PaginationState::with_len(size(5), 30);
    for _ in 0..5 {
        state.go_to_next();
    }

    assert!(state.resize(12));
    assert_eq!(state.current_page(), 3);
    assert_eq!(state.total_pages(), 3);

    assert!(state.resize(0));
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.total_pages(), 1);
}

#[test]
fn test_resize_growth_keeps_current_page() {
    let mut state = PaginationState::with_len(size(5), 12);
    state.go_to_next();

    assert!(!state.resize(100));
    assert_eq!(state.current_page(), 2);
    assert_eq!(state.total_pages(), 20);
}

// ============================================================================
// Slicer Tests
// ============================================================================

#[test]
fn test_slice_scenario_twelve_records() {
    let data = numbers(12);
    let page_size = size(5);

    assert_eq!(slice(&data, 1, page_size), &[0, 1, 2, 3, 4]);
    assert_eq!(slice(&data, 2, page_size), &[5, 6, 7, 8, 9]);
    assert_eq!(slice(&data, 3, page_size), &[10, 11]);
}

#[test]
fn test_slice_empty_dataset() {
    let data: Vec<usize> = Vec::new();
    assert!(slice(&data, 1, size(5)).is_empty());
}

#[test]
fn test_slice_past_the_end_is_empty() {
    let data = numbers(7);
    assert!(slice(&data, 3, size(5)).is_empty());
    assert!(slice(&data, usize::MAX, size(5)).is_empty());
}

#[test]
fn test_slice_page_zero_reads_as_first_page() {
    let data = numbers(7);
    assert_eq!(slice(&data, 0, size(5)), slice(&data, 1, size(5)));
}

#[test_case(12, 5, 3 => 10..12; "remainder on last page")]
#[test_case(15, 5, 3 => 10..15; "exact multiple")]
#[test_case(0, 5, 1 => 0..0; "empty")]
#[test_case(4, 5, 2 => 4..4; "beyond last page")]
fn test_page_window(len: usize, page_size: usize, page: usize) -> std::ops::Range<usize> {
    page_window(len, page, size(page_size))
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone)]
enum Event {
    Previous,
    Next,
    NextWithin(usize),
    Resize(usize),
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Previous),
        Just(Event::Next),
        (0usize..20).prop_map(Event::NextWithin),
        (0usize..200).prop_map(Event::Resize),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_derive_matches_ceiling_formula(page_size in 1usize..=50, len in 0usize..=10_000) {
        let state = PaginationState::new(size(page_size));
        let expected = std::cmp::max(1, (len + page_size - 1) / page_size);
        prop_assert_eq!(state.derive(len), expected);
    }

    #[test]
    fn test_invariant_holds_under_arbitrary_event_sequences(
        page_size in 1usize..=10,
        len in 0usize..=200,
        events in prop::collection::vec(event(), 0..100),
    ) {
        let mut state = PaginationState::with_len(size(page_size), len);

        for event in events {
            let before = state.clone();
            match event {
                Event::Previous => {
                    state.go_to_previous();
                    if !before.has_previous() {
                        prop_assert_eq!(&state, &before);
                    }
                }
                Event::Next => {
                    state.go_to_next();
                    if !before.has_next() {
                        prop_assert_eq!(&state, &before);
                    }
                }
                Event::NextWithin(bound) => {
                    state.go_to_next_within(bound);
                }
                Event::Resize(len) => {
                    state.resize(len);
                }
            }

            prop_assert!(state.total_pages() >= 1);
            prop_assert!(
                (1..=state.total_pages()).contains(&state.current_page()),
                "page {} outside 1..={}",
                state.current_page(),
                state.total_pages()
            );
        }
    }

    #[test]
    fn test_slice_length_law(page_size in 1usize..=10, len in 0usize..=200) {
        let page_size = size(page_size);
        let data = numbers(len);
        let total = total_pages(len, page_size);

        for page in 1..total {
            prop_assert_eq!(slice(&data, page, page_size).len(), page_size.get());
        }
        let last = slice(&data, total, page_size).len();
        prop_assert_eq!(last, len - (total - 1) * page_size.get());
    }

    #[test]
    fn test_slices_partition_the_dataset(page_size in 1usize..=10, len in 0usize..=200) {
        let page_size = size(page_size);
        let data = numbers(len);
        let rebuilt: Vec<usize> = (1..=total_pages(len, page_size))
            .flat_map(|page| slice(&data, page, page_size).iter().copied())
            .collect();
        prop_assert_eq!(rebuilt, data);
    }

    #[test]
    fn test_slice_never_exceeds_page_size(
        page_size in 1usize..=10,
        len in 0usize..=200,
        page in any::<usize>(),
    ) {
        let data = numbers(len);
        prop_assert!(slice(&data, page, size(page_size)).len() <= page_size);
    }
}
