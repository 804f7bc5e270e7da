use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::gesture::Point;
use crate::image_loader::ImageKey;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum SwipeEvent {
    Key(KeyEvent),
    Pointer(PointerEvent),
    /// Terminal lost focus; treated like the pointer leaving the card
    FocusLost,
    ImageReady(ImageKey),
    Resize,
    Tick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Input normalized away from the terminal's mouse protocol: a press, drag or
/// release at a point in distance units. `column`/`row` keep the raw cell for
/// hit-testing on-screen buttons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
    pub column: u16,
    pub row: u16,
}

/// Distance units covered by one terminal cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 20.0,
        }
    }
}

impl CellSize {
    pub fn to_point(&self, column: u16, row: u16) -> Point {
        Point::new(column as f64 * self.width, row as f64 * self.height)
    }
}

/// Map a crossterm mouse event onto the pointer protocol. Only the left button
/// drives gestures; everything else is dropped.
pub fn normalize_mouse(ev: &MouseEvent, cell: CellSize) -> Option<PointerEvent> {
    let kind = match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerKind::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
        _ => return None,
    };
    Some(PointerEvent {
        kind,
        point: cell.to_point(ev.column, ev.row),
        column: ev.column,
        row: ev.row,
    })
}

/// Source of terminal events (keyboard, mouse, resize, image notifications)
pub trait SwipeEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<SwipeEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    tx: Sender<SwipeEvent>,
    rx: Receiver<SwipeEvent>,
}

impl CrosstermEventSource {
    pub fn new(cell: CellSize) -> Self {
        let (tx, rx) = mpsc::channel();
        let reader_tx = tx.clone();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) => Some(SwipeEvent::Key(key)),
                Ok(CtEvent::Mouse(mouse)) => normalize_mouse(&mouse, cell).map(SwipeEvent::Pointer),
                Ok(CtEvent::FocusLost) => Some(SwipeEvent::FocusLost),
                Ok(CtEvent::Resize(_, _)) => Some(SwipeEvent::Resize),
                Ok(_) => None,
                Err(e) => {
                    tracing::error!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if let Some(ev) = ev {
                if reader_tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self { tx, rx }
    }

    /// Handle for other producers (image loader) posting into the same loop
    pub fn sender(&self) -> Sender<SwipeEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new(CellSize::default())
    }
}

impl SwipeEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SwipeEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<SwipeEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SwipeEvent>) -> Self {
        Self { rx }
    }
}

impl SwipeEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SwipeEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: SwipeEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: SwipeEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> SwipeEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => SwipeEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crossterm::event::KeyModifiers;
    use std::sync::mpsc;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        assert_matches!(runner.step(), SwipeEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(SwipeEvent::Resize).unwrap();
        tx.send(SwipeEvent::ImageReady(ImageKey { token: 9, id: 3 }))
            .unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        assert_matches!(runner.step(), SwipeEvent::Resize);
        assert_matches!(
            runner.step(),
            SwipeEvent::ImageReady(ImageKey { token: 9, id: 3 })
        );
    }

    #[test]
    fn step_ticks_when_all_senders_dropped() {
        let (tx, rx) = mpsc::channel::<SwipeEvent>();
        drop(tx);
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );
        assert_matches!(runner.step(), SwipeEvent::Tick);
    }

    #[test]
    fn normalize_left_button_sequence() {
        let cell = CellSize::default();

        let down = normalize_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 2), cell)
            .unwrap();
        assert_eq!(down.kind, PointerKind::Down);
        assert_eq!(down.point, Point::new(40.0, 40.0));
        assert_eq!((down.column, down.row), (4, 2));

        let drag = normalize_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 15, 2), cell)
            .unwrap();
        assert_eq!(drag.kind, PointerKind::Move);
        assert_eq!(drag.point, Point::new(150.0, 40.0));

        let up = normalize_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 15, 3), cell)
            .unwrap();
        assert_eq!(up.kind, PointerKind::Up);
    }

    #[test]
    fn normalize_drops_other_buttons_and_motion() {
        let cell = CellSize::default();
        assert!(normalize_mouse(&mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), cell).is_none());
        assert!(normalize_mouse(&mouse(MouseEventKind::Moved, 1, 1), cell).is_none());
        assert!(normalize_mouse(&mouse(MouseEventKind::ScrollDown, 1, 1), cell).is_none());
    }

    #[test]
    fn cell_size_scales_points() {
        let cell = CellSize {
            width: 8.0,
            height: 16.0,
        };
        assert_eq!(cell.to_point(10, 3), Point::new(80.0, 48.0));
    }
}
