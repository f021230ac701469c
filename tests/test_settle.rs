mod common;

use common::{day, identity, incoming, setup, setup_counting, FailingStore};
use pickboard::application::settle_pick::SettleOutcome;
use pickboard::domain::entities::pick::{PickIdentity, SettlementPatch};
use pickboard::domain::error::DomainError;
use pickboard::domain::values::pick_status::PickStatus;
use pickboard::domain::values::tier::Tier;
use pickboard::PickBoard;
use pickboard::domain::ports::document_store::{DocumentStore, WriteMode};
use serde_json::json;
use std::sync::Arc;

fn win() -> SettlementPatch {
    SettlementPatch {
        status: Some(PickStatus::Win),
        closing: Some(1.85),
        ..Default::default()
    }
}

#[test]
fn test_settle_updates_only_the_matching_pick() {
    let board = setup();
    let date = day(2025, 1, 1);
    board
        .write_daily_picks(
            Tier::Pro,
            date,
            vec![
                incoming("A", "B", "OU2.5", "Over 2.5", Some(1.8)),
                incoming("A", "B", "BTTS", "Yes", Some(1.7)),
                incoming("C", "D", "OU2.5", "Over 2.5", Some(2.0)),
            ],
        )
        .unwrap();
    let before = board.day(Tier::Pro, date).unwrap().unwrap();

    let outcome = board
        .settle_pick(Tier::Pro, &identity("2025-01-01", "A", "B", "OU2.5", "Over 2.5"), &win())
        .unwrap();
    assert!(outcome.is_settled());

    let after = board.day(Tier::Pro, date).unwrap().unwrap();
    assert_eq!(after.picks.len(), 3);
    assert_eq!(after.picks[0].status, PickStatus::Win);
    assert_eq!(after.picks[0].closing, Some(1.85));
    assert_eq!(after.picks[0].odds, Some(1.8));
    assert_eq!(after.picks[1], before.picks[1]);
    assert_eq!(after.picks[2], before.picks[2]);
}

#[test]
fn test_settle_without_document_is_noop() {
    let (board, store) = setup_counting();
    let outcome = board
        .settle_pick(Tier::Free, &identity("2025-02-02", "A", "B", "1X2", "Home"), &win())
        .unwrap();
    assert!(matches!(outcome, SettleOutcome::NoDocument));
    assert_eq!(store.writes(), 0);
    assert!(board.day(Tier::Free, day(2025, 2, 2)).unwrap().is_none());
}

#[test]
fn test_settle_without_match_is_noop() {
    let (board, store) = setup_counting();
    board
        .write_daily_picks(Tier::Free, day(2025, 1, 1), vec![incoming("A", "B", "1X2", "Home", None)])
        .unwrap();
    let outcome = board
        .settle_pick(Tier::Free, &identity("2025-01-01", "A", "B", "1X2", "Away"), &win())
        .unwrap();
    assert!(matches!(outcome, SettleOutcome::NoMatch));
    assert_eq!(store.writes(), 1);
}

#[test]
fn test_invalid_identity_fails_before_store_access() {
    let (board, store) = setup_counting();
    let missing_home = PickIdentity {
        date: Some("2025-01-01".into()),
        away: Some("B".into()),
        ..Default::default()
    };
    let err = board.settle_pick(Tier::Free, &missing_home, &win()).unwrap_err();
    assert!(matches!(err, DomainError::InvalidIdentity(_)));
    assert_eq!(store.reads(), 0);

    // Validation also comes first against a broken backend.
    let broken = PickBoard::with_store(Arc::new(FailingStore));
    let err = broken.settle_pick(Tier::Free, &PickIdentity::default(), &win()).unwrap_err();
    assert!(matches!(err, DomainError::InvalidIdentity(_)));
}

#[test]
fn test_settle_accepts_timestamp_and_legacy_pick_field() {
    let board = setup();
    board
        .write_daily_picks(Tier::Free, day(2025, 1, 1), vec![incoming("A", "B", "OU2.5", "Over 2.5", None)])
        .unwrap();
    let legacy: PickIdentity = serde_json::from_str(
        r#"{"date": "2025-01-01T20:00:00Z", "home": " a", "away": "B", "market": "ou2.5", "pick": "over 2.5"}"#,
    )
    .unwrap();
    let outcome = board
        .settle_pick(
            Tier::Free,
            &legacy,
            &SettlementPatch {
                status: Some(PickStatus::Push),
                score: Some("1-1".into()),
                ..Default::default()
            },
        )
        .unwrap();
    match outcome {
        SettleOutcome::Settled { pick } => {
            assert_eq!(pick.status, PickStatus::Push);
            assert_eq!(pick.score.as_deref(), Some("1-1"));
        }
        other => panic!("expected settlement, got {other:?}"),
    }
}

#[test]
fn test_settle_can_correct_an_outcome() {
    let board = setup();
    board
        .write_daily_picks(Tier::Free, day(2025, 1, 1), vec![incoming("A", "B", "1X2", "Home", None)])
        .unwrap();
    let id = identity("2025-01-01", "A", "B", "1X2", "Home");
    board.settle_pick(Tier::Free, &id, &win()).unwrap();
    board
        .settle_pick(
            Tier::Free,
            &id,
            &SettlementPatch {
                status: Some(PickStatus::Lose),
                ..Default::default()
            },
        )
        .unwrap();
    let stored = board.day(Tier::Free, day(2025, 1, 1)).unwrap().unwrap();
    assert_eq!(stored.picks[0].status, PickStatus::Lose);
    assert_eq!(stored.picks[0].closing, Some(1.85));
}

#[test]
fn test_settle_passes_other_entries_through_unchanged() {
    let (board, store) = setup_counting();
    let untouched_legacy = json!({"date": "2025-01-01", "home": "X", "away": "Y", "market": "1X2",
        "selection": "Draw", "status": "", "createdAt": "2025-01-01T08:00:00Z",
        "updatedAt": "2025-01-01T08:00:00Z"});
    let unreadable = json!({"home": "Old", "away": "Format", "status": 3});
    let raw = json!({
        "date": "2025-01-01",
        "picks": [
            untouched_legacy.clone(),
            {"date": "2025-01-01", "home": "A", "away": "B", "market": "1X2", "selection": "Home",
             "status": "pending", "source": "manual",
             "createdAt": "2025-01-01T08:00:00Z", "updatedAt": "2025-01-01T08:00:00Z"},
            unreadable.clone()
        ]
    });
    let serde_json::Value::Object(doc) = raw else { unreachable!() };
    store.set(Tier::Free.collection(), "2025-01-01", doc, WriteMode::Replace).unwrap();

    let outcome = board
        .settle_pick(Tier::Free, &identity("2025-01-01", "A", "B", "1X2", "Home"), &win())
        .unwrap();
    assert!(outcome.is_settled());

    let stored = store.get(Tier::Free.collection(), "2025-01-01").unwrap().unwrap();
    let entries = stored["picks"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.contains(&unreadable));

    let day_doc = board.day(Tier::Free, day(2025, 1, 1)).unwrap().unwrap();
    let xy = day_doc.picks.iter().find(|p| p.home == "X").unwrap();
    assert_eq!(xy.status, PickStatus::Pending);
    assert_eq!(xy.selection, "Draw");
    let ab = day_doc.picks.iter().find(|p| p.home == "A").unwrap();
    assert_eq!(ab.status, PickStatus::Win);
}

#[test]
fn test_store_failure_propagates() {
    let board = PickBoard::with_store(Arc::new(FailingStore));
    let err = board
        .settle_pick(Tier::Free, &identity("2025-01-01", "A", "B", "1X2", "Home"), &win())
        .unwrap_err();
    assert!(matches!(err, DomainError::Database(_)));
}
