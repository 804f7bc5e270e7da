use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kitty_match::deck::{Deck, LocatorTemplate, DECK_SIZE};
use kitty_match::gesture::Point;
use kitty_match::image_loader::{NullImageLoader, RecordingImageLoader};
use kitty_match::runtime::{
    CellSize, FixedTicker, PointerEvent, PointerKind, Runner, SwipeEvent, TestEventSource,
};
use kitty_match::session::SessionConfig;
use kitty_match::swipe::SwipeSession;

fn pointer(kind: PointerKind, x: f64) -> SwipeEvent {
    SwipeEvent::Pointer(PointerEvent {
        kind,
        point: Point::new(x, 200.0),
        column: (x / CellSize::default().width) as u16,
        row: 10,
    })
}

fn key(code: KeyCode) -> SwipeEvent {
    SwipeEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

// Minimal event loop without the terminal: keys decide, pointer events drag.
fn drive<E, T>(session: &mut SwipeSession, runner: &Runner<E, T>, max_steps: u32)
where
    E: kitty_match::runtime::SwipeEventSource,
    T: kitty_match::runtime::Ticker,
{
    for _ in 0..max_steps {
        match runner.step() {
            SwipeEvent::Key(k) => match k.code {
                KeyCode::Left => {
                    session.dislike();
                }
                KeyCode::Right => {
                    session.like();
                }
                KeyCode::Char('q') => break,
                _ => {}
            },
            SwipeEvent::Pointer(p) => match p.kind {
                PointerKind::Down => {
                    session.begin_gesture(p.point);
                }
                PointerKind::Move => {
                    session.update_gesture(p.point);
                }
                PointerKind::Up => {
                    session.end_gesture();
                }
            },
            SwipeEvent::FocusLost => {
                session.end_gesture();
            }
            SwipeEvent::ImageReady(k) => {
                session.on_image_ready(k);
            }
            SwipeEvent::Resize | SwipeEvent::Tick => {}
        }
    }
}

fn runner(rx: mpsc::Receiver<SwipeEvent>) -> Runner<TestEventSource, FixedTicker> {
    Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    )
}

#[test]
fn headless_all_disliked_ends_with_no_matches() {
    let mut session = SwipeSession::new(SessionConfig::default(), Box::new(NullImageLoader));
    let (tx, rx) = mpsc::channel();
    for _ in 0..DECK_SIZE {
        tx.send(key(KeyCode::Left)).unwrap();
    }
    tx.send(key(KeyCode::Char('q'))).unwrap();

    drive(&mut session, &runner(rx), 100);

    assert!(session.has_ended());
    let snap = session.snapshot();
    assert!(snap.liked.is_empty());
    assert_eq!(snap.summary_line(), "You liked 0 out of 15 kitties");
}

#[test]
fn headless_ten_likes_five_dislikes_keeps_order() {
    let mut session = SwipeSession::new(SessionConfig::default(), Box::new(NullImageLoader));
    let (tx, rx) = mpsc::channel();
    for _ in 0..10 {
        tx.send(key(KeyCode::Right)).unwrap();
    }
    for _ in 0..5 {
        tx.send(key(KeyCode::Left)).unwrap();
    }
    tx.send(key(KeyCode::Char('q'))).unwrap();

    drive(&mut session, &runner(rx), 100);

    assert!(session.has_ended());
    let ids: Vec<usize> = session.liked().iter().map(|c| c.id).collect();
    assert_eq!(ids, (0..10).collect::<Vec<_>>());
    assert_eq!(
        session.snapshot().summary_line(),
        "You liked 10 out of 15 kitties"
    );
}

#[test]
fn headless_drag_sequence_commits_and_snaps_back() {
    let mut session = SwipeSession::new(SessionConfig::default(), Box::new(NullImageLoader));
    let (tx, rx) = mpsc::channel();
    // 150 right: like
    tx.send(pointer(PointerKind::Down, 300.0)).unwrap();
    tx.send(pointer(PointerKind::Move, 400.0)).unwrap();
    tx.send(pointer(PointerKind::Move, 450.0)).unwrap();
    tx.send(pointer(PointerKind::Up, 450.0)).unwrap();
    // 60 left: back to center
    tx.send(pointer(PointerKind::Down, 300.0)).unwrap();
    tx.send(pointer(PointerKind::Move, 240.0)).unwrap();
    tx.send(pointer(PointerKind::Up, 240.0)).unwrap();
    // 120 left, released by losing focus: dislike
    tx.send(pointer(PointerKind::Down, 300.0)).unwrap();
    tx.send(pointer(PointerKind::Move, 180.0)).unwrap();
    tx.send(SwipeEvent::FocusLost).unwrap();
    tx.send(key(KeyCode::Char('q'))).unwrap();

    drive(&mut session, &runner(rx), 100);

    assert_eq!(session.position(), 2);
    let ids: Vec<usize> = session.liked().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![0]);
    assert!(!session.gesture().is_active());
}

#[test]
fn headless_image_notifications_follow_the_current_card() {
    let loader = RecordingImageLoader::new();
    let deck = Deck::with_token(&LocatorTemplate::default(), 42);
    let mut session =
        SwipeSession::with_deck(SessionConfig::default(), deck, Box::new(loader.clone()));

    let (tx, rx) = mpsc::channel();
    let first = loader.requests()[0].key;
    tx.send(key(KeyCode::Right)).unwrap();
    // Arrives after the card was decided: stale
    tx.send(SwipeEvent::ImageReady(first)).unwrap();
    tx.send(key(KeyCode::Char('q'))).unwrap();

    drive(&mut session, &runner(rx), 100);
    assert!(!session.is_image_ready());

    let second = loader.requests()[1].key;
    assert_eq!(second.id, 1);
    assert!(session.on_image_ready(second));
    assert!(session.is_image_ready());
}

#[test]
fn headless_idle_loop_only_ticks() {
    let mut session = SwipeSession::new(SessionConfig::default(), Box::new(NullImageLoader));
    let (_tx, rx) = mpsc::channel();
    drive(&mut session, &runner(rx), 5);
    assert_eq!(session.position(), 0);
    assert!(!session.has_ended());
}
