use std::sync::Once;

use entryflow_core::{
    update, CheckReport, Effect, MonitorState, Msg, NewEntry, PageRef, StatusKind,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(flow_logging::initialize_for_tests);
}

fn entry(id: u64) -> NewEntry {
    NewEntry {
        id,
        html: format!("<li data-id=\"{id}\">entry {id}</li>"),
    }
}

fn seeded() -> MonitorState {
    let (state, _) = update(
        MonitorState::new(),
        Msg::ThreadSeeded {
            thread_url: "https://forum.example.com/some-topic--123".to_string(),
            page: Some(PageRef::new(3, 3)),
            entries: vec![entry(100), entry(101)],
        },
    );
    state
}

#[test]
fn merged_entries_append_in_given_order_and_grow_known_set() {
    init_logging();
    let (state, effects) = update(
        seeded(),
        Msg::CheckFinished(CheckReport {
            entries: vec![entry(102), entry(103)],
            total_pages: Some(3),
            error: None,
        }),
    );

    assert_eq!(
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::AppendEntries { entries } =>
                    Some(entries.iter().map(|e| e.id).collect::<Vec<_>>()),
                _ => None,
            })
            .expect("append effect"),
        vec![102, 103]
    );
    assert!(effects.contains(&Effect::HighlightEntry { id: 103 }));

    let view = state.view();
    assert_eq!(view.entry_count, 4);
    let status = view.status.expect("status line");
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, "2 new entries");
}

#[test]
fn already_known_entries_in_a_report_are_dropped() {
    init_logging();
    // A stale overlapping cycle can report entries merged meanwhile.
    let (state, effects) = update(
        seeded(),
        Msg::CheckFinished(CheckReport {
            entries: vec![entry(100), entry(102), entry(103)],
            total_pages: Some(3),
            error: None,
        }),
    );

    let appended = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::AppendEntries { entries } => {
                Some(entries.iter().map(|e| e.id).collect::<Vec<_>>())
            }
            _ => None,
        })
        .expect("append effect");
    assert_eq!(appended, vec![102, 103]);
    assert_eq!(state.view().entry_count, 4);
}

#[test]
fn repeated_report_merges_nothing() {
    init_logging();
    let report = CheckReport {
        entries: vec![entry(102)],
        total_pages: Some(3),
        error: None,
    };

    let (state, _) = update(seeded(), Msg::CheckFinished(report.clone()));
    assert_eq!(state.view().entry_count, 3);

    let (state, effects) = update(state, Msg::CheckFinished(report));
    assert_eq!(state.view().entry_count, 3);
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::AppendEntries { .. })));
    assert_eq!(state.view().status.expect("status").text, "no new entries");
}

#[test]
fn successful_cycle_updates_tracked_total_pages() {
    init_logging();
    let (state, _) = update(
        seeded(),
        Msg::CheckFinished(CheckReport {
            entries: vec![entry(104)],
            total_pages: Some(5),
            error: None,
        }),
    );
    assert_eq!(state.view().total_pages, 5);
}

#[test]
fn failed_cycle_merges_partial_batch_and_keeps_total_pages() {
    init_logging();
    let (state, effects) = update(
        seeded(),
        Msg::CheckFinished(CheckReport {
            entries: vec![entry(102)],
            total_pages: None,
            error: Some("http status 503".to_string()),
        }),
    );

    // Entries gathered before the failure stay merged.
    assert!(effects.contains(&Effect::AppendEntries {
        entries: vec![entry(102)]
    }));
    assert_eq!(state.view().entry_count, 3);
    // The tracked boundary is not advanced past the failure.
    assert_eq!(state.view().total_pages, 3);

    let status = state.view().status.expect("status line");
    assert_eq!(status.kind, StatusKind::Error);
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, Effect::Notify(text) if text.contains("http status 503"))));
    assert!(!state.check_in_flight());
}

#[test]
fn seeding_twice_with_the_same_document_is_idempotent() {
    init_logging();
    let seed = Msg::ThreadSeeded {
        thread_url: "https://forum.example.com/some-topic--123".to_string(),
        page: Some(PageRef::new(3, 3)),
        entries: vec![entry(100), entry(101)],
    };

    let (first, effects) = update(MonitorState::new(), seed.clone());
    assert!(effects.contains(&Effect::AppendEntries {
        entries: vec![entry(100), entry(101)]
    }));

    let (mut second, effects) = update(first.clone(), seed);
    assert!(effects.is_empty());
    second.consume_dirty();
    let mut first = first;
    first.consume_dirty();
    assert_eq!(first, second);
}

#[test]
fn seed_with_invalid_address_only_notifies() {
    init_logging();
    let (state, effects) = update(
        MonitorState::new(),
        Msg::ThreadSeeded {
            thread_url: "not a url".to_string(),
            page: None,
            entries: vec![entry(1)],
        },
    );

    assert!(!state.is_seeded());
    assert!(matches!(effects.as_slice(), [Effect::Notify(_)]));
}
