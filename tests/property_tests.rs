use genbi_tui::config::AppConfig;
use genbi_tui::internal::filters::{HistoryTab, board_history, dedupe_by_id, period_year};
use genbi_tui::internal::infinite_scroll::InfiniteScroll;
use genbi_tui::internal::models::PeriodSummary;
use genbi_tui::internal::pages::Cursor;
use genbi_tui::internal::tabs::{TabController, TabPolicy};
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #[test]
    fn test_dedupe_never_repeats_ids(
        existing in prop::collection::vec(0u64..50, 0..20),
        incoming in prop::collection::vec(0u64..50, 0..20),
    ) {
        let kept = dedupe_by_id(&existing, incoming, |id| *id);
        let mut seen: HashSet<u64> = existing.iter().copied().collect();
        for id in &kept {
            prop_assert!(seen.insert(*id), "id {} kept twice", id);
        }
    }

    #[test]
    fn test_board_history_sorted_and_complete(
        periods in prop::collection::vec(prop::option::of(2000u32..2030), 0..15),
    ) {
        let input: Vec<PeriodSummary> = periods
            .iter()
            .map(|p| PeriodSummary {
                periode: p.map(|y| format!("{}/{}", y, y + 1)),
                ..Default::default()
            })
            .collect();
        let sorted = board_history(&input, HistoryTab::Latest);
        prop_assert_eq!(sorted.len(), input.len());

        let years: Vec<Option<u32>> = sorted.iter().map(|p| period_year(p.periode.as_deref())).collect();
        for pair in years.windows(2) {
            match (pair[0], pair[1]) {
                (Some(a), Some(b)) => prop_assert!(a >= b),
                (None, Some(_)) => prop_assert!(false, "undated period before a dated one"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_cursor_stays_in_bounds(moves in prop::collection::vec(any::<bool>(), 0..60), len in 0usize..10) {
        let mut cursor = Cursor::default();
        for down in moves {
            match down {
                true => cursor.down(len),
                false => cursor.up(),
            }
            prop_assert!(cursor.index() < len.max(1));
        }
    }

    #[test]
    fn test_infinite_scroll_one_request_in_flight(
        positions in prop::collection::vec(0usize..40, 1..30),
        threshold in 0usize..5,
    ) {
        let mut scroll = InfiniteScroll::new(threshold);
        scroll.start();
        scroll.on_page_loaded(1, 10, None);
        let mut requested = 0;
        for position in positions {
            if scroll.on_scroll(position, 10).is_some() {
                requested += 1;
            }
        }
        prop_assert!(requested <= 1);
    }

    #[test]
    fn test_tab_next_prev_roundtrip(len in 1usize..8, steps in 0usize..20) {
        let mut tabs = TabController::new((0..len).collect::<Vec<_>>(), TabPolicy::LocalFilter);
        for _ in 0..steps {
            tabs.next();
        }
        for _ in 0..steps {
            tabs.prev();
        }
        prop_assert_eq!(tabs.active_index(), 0);
    }

    #[test]
    fn test_config_parsing_resilience(s in "\\PC*") {
        // Random input may fail to parse but must not panic.
        let _ = ron::from_str::<AppConfig>(&s);
    }
}
