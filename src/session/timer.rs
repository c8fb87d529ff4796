use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { session: u64, remaining: u32 },
    Expired { session: u64 },
}

impl TimerEvent {
    pub fn session(&self) -> u64 {
        match *self {
            TimerEvent::Tick { session, .. } | TimerEvent::Expired { session } => session,
        }
    }
}

/// Where the countdown thread posts its events. Returns false once the
/// receiving side is gone, which stops the thread.
pub type TimerSink = Arc<dyn Fn(TimerEvent) -> bool + Send + Sync>;

const RUNNING: u8 = 0;
const CANCELLED: u8 = 1;
const EXPIRED: u8 = 2;

/// Background countdown for one quiz session.
///
/// The thread only sleeps and posts events; it never touches session state.
/// Its shared state moves from running to either cancelled or expired exactly
/// once, so a natural finish and a timeout cannot both win.
pub struct Countdown {
    state: Arc<AtomicU8>,
}

impl Countdown {
    pub fn start(session: u64, total_secs: u32, tick: Duration, sink: TimerSink) -> Self {
        let state = Arc::new(AtomicU8::new(RUNNING));
        let thread_state = Arc::clone(&state);

        thread::spawn(move || {
            let mut remaining = total_secs;
            while remaining > 0 {
                thread::sleep(tick);
                if thread_state.load(Ordering::SeqCst) != RUNNING {
                    return;
                }
                remaining -= 1;
                if remaining > 0 && !sink(TimerEvent::Tick { session, remaining }) {
                    return;
                }
            }
            if thread_state
                .compare_exchange(RUNNING, EXPIRED, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                log::debug!("Countdown for session {session} expired");
                sink(TimerEvent::Expired { session });
            }
        });

        Self { state }
    }

    /// Stop the countdown. Returns false if it had already expired.
    pub fn cancel(&self) -> bool {
        match self
            .state
            .compare_exchange(RUNNING, CANCELLED, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => true,
            Err(current) => current == CANCELLED,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.state.load(Ordering::SeqCst) == EXPIRED
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Instant;

    use super::*;

    fn channel_sink() -> (TimerSink, mpsc::Receiver<TimerEvent>) {
        let (tx, rx) = mpsc::channel();
        let sink: TimerSink = Arc::new(move |event: TimerEvent| tx.send(event).is_ok());
        (sink, rx)
    }

    #[test]
    fn ticks_down_then_expires() {
        let (sink, rx) = channel_sink();
        let countdown = Countdown::start(7, 3, Duration::from_millis(5), sink);

        let mut events = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_secs(2)) {
            let done = matches!(event, TimerEvent::Expired { .. });
            events.push(event);
            if done {
                break;
            }
        }
        assert_eq!(
            events,
            vec![
                TimerEvent::Tick { session: 7, remaining: 2 },
                TimerEvent::Tick { session: 7, remaining: 1 },
                TimerEvent::Expired { session: 7 },
            ]
        );
        assert!(countdown.is_expired());
        assert!(!countdown.cancel(), "cancel after expiry must report the loss");
    }

    #[test]
    fn cancelled_countdown_never_expires() {
        let (sink, rx) = channel_sink();
        let countdown = Countdown::start(1, 2, Duration::from_millis(20), sink);
        assert!(countdown.cancel());

        let deadline = Instant::now() + Duration::from_millis(150);
        while Instant::now() < deadline {
            if let Ok(event) = rx.recv_timeout(Duration::from_millis(10)) {
                assert!(
                    !matches!(event, TimerEvent::Expired { .. }),
                    "expired after cancel"
                );
            }
        }
        assert!(!countdown.is_expired());
    }

    #[test]
    fn dropping_cancels() {
        let (sink, rx) = channel_sink();
        drop(Countdown::start(1, 1, Duration::from_millis(20), sink));
        assert!(rx.recv_timeout(Duration::from_millis(120)).is_err());
    }
}
