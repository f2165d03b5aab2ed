mod support;

use std::sync::Arc;

use hoverreel_model::PreferenceSnapshot;
use hoverreel_preview::testing::InMemoryPreferenceService;
use hoverreel_preview::{
    HoverRegion, PreferenceOp, PreferenceResult, PreferenceService,
    PreviewEvent,
};

use support::{Harness, id, trailer_content};

fn open(h: &mut Harness) {
    h.enter(HoverRegion::Card);
    h.run_until(h.elapsed_ms() + 300);
    assert!(h.controller.is_open());
    h.events();
}

#[tokio::test]
async fn fetched_preferences_populate_the_view() {
    let service = InMemoryPreferenceService::new().with_snapshot(
        id("movie-42"),
        PreferenceSnapshot {
            is_liked: true,
            is_in_list: false,
        },
    );
    let mut h = Harness::new(trailer_content());
    open(&mut h);

    let requests = h.controller.take_preference_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].op(), PreferenceOp::Fetch);

    for request in requests {
        let outcome = request.run(&service).await;
        assert!(h.controller.apply_preference_outcome(outcome));
    }

    let view = h.controller.view(h.now());
    assert!(view.is_liked);
    assert!(!view.is_in_list);
    assert!(h.controller.take_preference_requests().is_empty());
}

#[tokio::test]
async fn outcome_after_close_is_discarded() {
    let service = InMemoryPreferenceService::new();
    let mut h = Harness::new(trailer_content());
    open(&mut h);
    let request = h
        .controller
        .request_like_toggle()
        .expect("session is open");

    h.leave(HoverRegion::Card);
    h.run_until(h.elapsed_ms() + 120);
    assert!(!h.controller.is_open());
    assert!(!request.is_live());

    // The request never reaches the backend once its session is gone.
    let outcome = request.run(&service).await;
    assert_eq!(outcome.result, PreferenceResult::Cancelled);
    assert_eq!(service.calls(), 0);
    assert!(!h.controller.apply_preference_outcome(outcome));
}

#[tokio::test]
async fn outcome_from_previous_session_is_ignored() {
    let service = InMemoryPreferenceService::new();
    let mut h = Harness::new(trailer_content());
    open(&mut h);
    let stale = h
        .controller
        .request_watchlist_toggle()
        .expect("session is open");
    let outcome = stale.run(&service).await;

    h.leave(HoverRegion::Card);
    h.run_until(h.elapsed_ms() + 120);
    open(&mut h);

    assert!(!h.controller.apply_preference_outcome(outcome));
    assert!(!h.controller.view(h.now()).is_in_list);
}

#[tokio::test]
async fn successful_toggles_update_state() {
    let service = InMemoryPreferenceService::new();
    let mut h = Harness::new(trailer_content());
    open(&mut h);

    let like = h.controller.request_like_toggle().expect("open");
    let outcome = like.run(&service).await;
    assert!(h.controller.apply_preference_outcome(outcome));

    let add = h.controller.request_watchlist_toggle().expect("open");
    let outcome = add.run(&service).await;
    assert!(h.controller.apply_preference_outcome(outcome));

    let view = h.controller.view(h.now());
    assert!(view.is_liked);
    assert!(view.is_in_list);
    assert!(service.snapshot(&id("movie-42")).is_liked);

    // The next toggle flips back.
    let unlike = h.controller.request_like_toggle().expect("open");
    assert_eq!(
        unlike.op(),
        PreferenceOp::Like(hoverreel_model::LikeAction::Unlike)
    );
}

#[tokio::test]
async fn late_lookup_keeps_confirmed_toggle() {
    let service = InMemoryPreferenceService::new().with_snapshot(
        id("movie-42"),
        PreferenceSnapshot {
            is_liked: false,
            is_in_list: true,
        },
    );
    let mut h = Harness::new(trailer_content());
    open(&mut h);

    // The lookup resolves first but reaches the controller last.
    let fetch = h.controller.take_preference_requests().remove(0);
    let lookup = fetch.run(&service).await;

    let like = h.controller.request_like_toggle().expect("open");
    let toggled = like.run(&service).await;
    assert!(h.controller.apply_preference_outcome(toggled));
    assert!(h.controller.view(h.now()).is_liked);

    assert!(h.controller.apply_preference_outcome(lookup));
    let view = h.controller.view(h.now());
    assert!(view.is_liked);
    assert!(view.is_in_list);
}

#[tokio::test]
async fn lookup_after_both_toggles_is_dropped() {
    let service = InMemoryPreferenceService::new();
    let mut h = Harness::new(trailer_content());
    open(&mut h);
    let fetch = h.controller.take_preference_requests().remove(0);
    let lookup = fetch.run(&service).await;

    let like = h.controller.request_like_toggle().expect("open");
    let outcome = like.run(&service).await;
    assert!(h.controller.apply_preference_outcome(outcome));
    let add = h.controller.request_watchlist_toggle().expect("open");
    let outcome = add.run(&service).await;
    assert!(h.controller.apply_preference_outcome(outcome));
    h.events();

    assert!(!h.controller.apply_preference_outcome(lookup));
    assert!(h.events().is_empty());
    let view = h.controller.view(h.now());
    assert!(view.is_liked);
    assert!(view.is_in_list);
}

#[tokio::test]
async fn failures_degrade_to_safe_state() {
    let service = InMemoryPreferenceService::new().with_snapshot(
        id("movie-42"),
        PreferenceSnapshot {
            is_liked: true,
            is_in_list: true,
        },
    );
    let mut h = Harness::new(trailer_content());
    open(&mut h);
    service.set_failing(true);

    let fetch = h.controller.take_preference_requests().remove(0);
    let outcome = fetch.run(&service).await;
    assert!(matches!(outcome.result, PreferenceResult::Failed(_)));
    assert!(h.controller.apply_preference_outcome(outcome));
    let view = h.controller.view(h.now());
    assert!(!view.is_liked);
    assert!(!view.is_in_list);

    h.events();
    let like = h.controller.request_like_toggle().expect("open");
    let outcome = like.run(&service).await;
    assert!(!h.controller.apply_preference_outcome(outcome));
    assert!(!h.controller.view(h.now()).is_liked);
    assert!(h.events().is_empty());
}

#[tokio::test]
async fn spawned_requests_run_on_the_runtime() {
    let backend = InMemoryPreferenceService::new().with_snapshot(
        id("movie-42"),
        PreferenceSnapshot {
            is_liked: false,
            is_in_list: true,
        },
    );
    let service: Arc<dyn PreferenceService> = Arc::new(backend.clone());
    let mut h = Harness::new(trailer_content());
    open(&mut h);

    let handles: Vec<_> = h
        .controller
        .take_preference_requests()
        .into_iter()
        .map(|request| request.spawn(Arc::clone(&service)))
        .collect();
    for handle in handles {
        let outcome = handle.await.expect("task completes");
        assert!(h.controller.apply_preference_outcome(outcome));
    }

    assert_eq!(
        h.events(),
        vec![PreviewEvent::PreferencesUpdated {
            snapshot: PreferenceSnapshot {
                is_liked: false,
                is_in_list: true,
            }
        }]
    );
    assert_eq!(backend.calls(), 1);
}
