use kanal::{AsyncReceiver, AsyncSender};
use vocab_api::ApiError;
use vocab_core::{Route, SessionStorage};
use vocab_types::{
    AppEvent, CategoryDraft, CategoryFilter, Id, Page, ReviewCommand, UiEvent, WordDraft,
};

use super::backend::{Backend, backend};
use crate::events::handle_events;

fn channel() -> (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>) {
    kanal::unbounded_async()
}

fn drain(rx: &AsyncReceiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(Some(event)) = rx.try_recv() {
        events.push(event);
    }
    events
}

async fn send(backend: &Backend, tx: &AsyncSender<UiEvent>, event: AppEvent) {
    handle_events(backend.state.clone(), tx, event)
        .await
        .expect("handler failed");
}

async fn sign_up_and_in(backend: &Backend, tx: &AsyncSender<UiEvent>) {
    send(
        backend,
        tx,
        AppEvent::Register {
            full_name: "Ann Lee".into(),
            email: "ann@example.com".into(),
            password: "12345678".into(),
            confirm_password: "12345678".into(),
        },
    )
    .await;
    send(
        backend,
        tx,
        AppEvent::Login {
            email: "ann@example.com".into(),
            password: "12345678".into(),
        },
    )
    .await;
}

fn errors(events: &[UiEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            UiEvent::Error { message, .. } => Some(message.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_invalid_registration_never_reaches_server() {
    let backend = backend();
    let (tx, rx) = channel();

    send(
        &backend,
        &tx,
        AppEvent::Register {
            full_name: "".into(),
            email: "a@b.com".into(),
            password: "12345678".into(),
            confirm_password: "12345678".into(),
        },
    )
    .await;

    let events = drain(&rx);
    assert_eq!(errors(&events), vec!["Please enter your full name!".to_string()]);
    assert!(backend.state.auth.current_user().is_none());
}

#[tokio::test]
async fn test_guarded_events_redirect_visitors() {
    let backend = backend();
    let (tx, rx) = channel();

    send(&backend, &tx, AppEvent::LoadWords).await;
    send(&backend, &tx, AppEvent::Navigate("/flashcards".into())).await;

    let events = drain(&rx);
    let redirects: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            UiEvent::Redirect(path) => Some(path.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(redirects, vec!["/login", "/login"]);
    assert_eq!(backend.state.views().route, Route::Login);
}

#[tokio::test]
async fn test_login_persists_session_and_goes_home() {
    let backend = backend();
    let (tx, rx) = channel();

    sign_up_and_in(&backend, &tx).await;

    assert_eq!(backend.state.views().route, Route::Home);
    assert!(backend.storage.read("currentUser").unwrap().is_some());
    let events = drain(&rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, UiEvent::Notice(text) if text == "Welcome back, Ann Lee!")));

    send(&backend, &tx, AppEvent::Navigate("/login".into())).await;
    assert_eq!(backend.state.views().route, Route::Home);

    send(&backend, &tx, AppEvent::Logout).await;
    assert_eq!(backend.state.views().route, Route::Login);
    assert!(backend.storage.read("currentUser").unwrap().is_none());
}

#[tokio::test]
async fn test_category_lifecycle_and_duplicate_name() {
    let backend = backend();
    let (tx, rx) = channel();
    sign_up_and_in(&backend, &tx).await;
    drain(&rx);

    send(
        &backend,
        &tx,
        AppEvent::CreateCategory(CategoryDraft::new("Animals", "zoo")),
    )
    .await;
    send(
        &backend,
        &tx,
        AppEvent::CreateCategory(CategoryDraft::new(" animals", "")),
    )
    .await;

    let events = drain(&rx);
    assert_eq!(
        errors(&events),
        vec![vocab_core::categories::NAME_TAKEN.to_string()]
    );
    match events.last() {
        Some(UiEvent::ShowCategories { rows, total, .. }) => {
            assert_eq!(*total, 1);
            assert_eq!(rows[0].name, "Animals");
        }
        other => panic!("expected category list, got {other:?}"),
    }

    send(&backend, &tx, AppEvent::DeleteCategory(Id::Num(1))).await;
    assert!(backend.state.categories.data().is_empty());
}

#[tokio::test]
async fn test_words_render_with_category_labels() {
    let backend = backend();
    let (tx, rx) = channel();
    sign_up_and_in(&backend, &tx).await;

    send(
        &backend,
        &tx,
        AppEvent::CreateCategory(CategoryDraft::new("Animals", "")),
    )
    .await;
    send(
        &backend,
        &tx,
        AppEvent::CreateWord(WordDraft::new("cat", "mèo").with_category(1u64)),
    )
    .await;
    send(
        &backend,
        &tx,
        AppEvent::CreateWord(WordDraft::new("sky", "trời").with_category(99u64)),
    )
    .await;
    drain(&rx);

    send(&backend, &tx, AppEvent::Navigate("/words".into())).await;
    let events = drain(&rx);
    let Some(UiEvent::ShowWords(rows)) = events.last() else {
        panic!("expected word list, got {events:?}");
    };
    let labels: Vec<_> = rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(labels, vec!["Animals", "N/A"]);

    send(
        &backend,
        &tx,
        AppEvent::SearchWords {
            text: "CA".into(),
            filter: CategoryFilter::Only(Id::Num(1)),
        },
    )
    .await;
    let events = drain(&rx);
    let Some(UiEvent::ShowWords(rows)) = events.last() else {
        panic!("expected word list, got {events:?}");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].word, "cat");
}

#[tokio::test]
async fn test_review_flow() {
    let backend = backend();
    let (tx, rx) = channel();
    sign_up_and_in(&backend, &tx).await;
    for (word, meaning) in [("cat", "mèo"), ("dog", "chó"), ("fox", "cáo")] {
        send(
            &backend,
            &tx,
            AppEvent::CreateWord(WordDraft::new(word, meaning)),
        )
        .await;
    }
    send(&backend, &tx, AppEvent::Navigate("/flashcards".into())).await;
    drain(&rx);

    send(&backend, &tx, AppEvent::Review(ReviewCommand::Previous)).await;
    send(&backend, &tx, AppEvent::Review(ReviewCommand::Flip)).await;
    let events = drain(&rx);
    let Some(UiEvent::ShowCard(card)) = events.last() else {
        panic!("expected card, got {events:?}");
    };
    assert_eq!(card.face.as_deref(), Some("cáo"));
    assert_eq!(card.position, 3);
    assert!(card.flipped);

    send(&backend, &tx, AppEvent::Review(ReviewCommand::MarkLearned)).await;
    let events = drain(&rx);
    let Some(UiEvent::ShowCard(card)) = events.last() else {
        panic!("expected card, got {events:?}");
    };
    assert_eq!(card.learned, 1);
    assert_eq!(card.progress_percent, 33);
    assert!(backend.state.words.data()[2].is_learned);

    // Editing the word text keeps it learned
    send(
        &backend,
        &tx,
        AppEvent::UpdateWord {
            id: Id::Num(3),
            draft: WordDraft::new("fox", "con cáo"),
        },
    )
    .await;
    assert!(backend.state.words.data()[2].is_learned);
}

#[tokio::test]
async fn test_remote_failure_reported_and_dismissed() {
    let backend = backend();
    let (tx, rx) = channel();
    sign_up_and_in(&backend, &tx).await;
    drain(&rx);

    *backend.words.fail_next.lock().unwrap() = Some(ApiError::Status {
        status: 500,
        message: None,
    });
    send(&backend, &tx, AppEvent::LoadWords).await;

    let events = drain(&rx);
    assert_eq!(errors(&events), vec!["Failed to load words!".to_string()]);
    assert!(backend.state.words.error().is_some());

    send(&backend, &tx, AppEvent::DismissError(Page::Words)).await;
    assert_eq!(backend.state.words.error(), None);

    *backend.categories.fail_next.lock().unwrap() = Some(ApiError::Status {
        status: 400,
        message: Some("Backend is read-only".into()),
    });
    send(&backend, &tx, AppEvent::Navigate("/categories".into())).await;
    let events = drain(&rx);
    assert_eq!(errors(&events), vec!["Backend is read-only".to_string()]);
    assert!(matches!(
        events.last(),
        Some(UiEvent::ShowCategories { total: 0, .. })
    ));
}

#[tokio::test]
async fn test_category_page_is_clamped() {
    let backend = backend();
    let (tx, rx) = channel();
    sign_up_and_in(&backend, &tx).await;
    for name in ["Animals", "Food", "Colors", "Jobs", "Sports", "Weather"] {
        send(
            &backend,
            &tx,
            AppEvent::CreateCategory(CategoryDraft::new(name, "")),
        )
        .await;
    }
    drain(&rx);

    send(&backend, &tx, AppEvent::CategoryPage(usize::MAX)).await;
    let events = drain(&rx);
    match events.last() {
        Some(UiEvent::ShowCategories { rows, page, total }) => {
            assert_eq!(*page, 2);
            assert_eq!(*total, 6);
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].name, "Weather");
        }
        other => panic!("expected category list, got {other:?}"),
    }

    send(&backend, &tx, AppEvent::DeleteCategory(Id::Num(6))).await;
    send(&backend, &tx, AppEvent::CategoryPage(2)).await;
    let events = drain(&rx);
    assert!(matches!(
        events.last(),
        Some(UiEvent::ShowCategories { page: 1, total: 5, .. })
    ));
}

#[tokio::test]
async fn test_card_follows_shrinking_deck() {
    let backend = backend();
    let (tx, rx) = channel();
    sign_up_and_in(&backend, &tx).await;
    for (word, meaning) in [("cat", "mèo"), ("dog", "chó"), ("fox", "cáo")] {
        send(
            &backend,
            &tx,
            AppEvent::CreateWord(WordDraft::new(word, meaning)),
        )
        .await;
    }
    send(&backend, &tx, AppEvent::Navigate("/flashcards".into())).await;
    send(&backend, &tx, AppEvent::Review(ReviewCommand::Previous)).await;

    send(&backend, &tx, AppEvent::DeleteWord(Id::Num(3))).await;
    send(&backend, &tx, AppEvent::Navigate("/flashcards".into())).await;
    let events = drain(&rx);
    let Some(UiEvent::ShowCard(card)) = events.last() else {
        panic!("expected card, got {events:?}");
    };
    assert_eq!(card.face.as_deref(), Some("dog"));
    assert_eq!((card.position, card.total), (2, 2));

    for id in [1, 2] {
        send(&backend, &tx, AppEvent::DeleteWord(Id::Num(id))).await;
    }
    send(&backend, &tx, AppEvent::Review(ReviewCommand::Flip)).await;
    let events = drain(&rx);
    let Some(UiEvent::ShowCard(card)) = events.last() else {
        panic!("expected card, got {events:?}");
    };
    assert_eq!(card.face, None);
    assert_eq!((card.position, card.total), (0, 0));
}
