//! Scripted typing burst replayed through a debouncer and a throttle.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::{Instant, sleep, sleep_until};

use knack_utils::{Debouncer, Throttle};

/// (offset in ms, text in the field after the keystroke)
const KEYSTROKES: [(u64, &str); 8] = [
    (0, "h"),
    (50, "he"),
    (100, "hel"),
    (150, "hell"),
    (200, "hello"),
    (700, "hello w"),
    (750, "hello wo"),
    (800, "hello wor"),
];

type Log = Arc<Mutex<Vec<String>>>;

fn push(log: &Log, start: Instant, what: &str, text: &str) {
    let ms = start.elapsed().as_millis();
    log.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(format!("{ms:>5}ms  {what:<9} {text:?}"));
}

/// Replay [`KEYSTROKES`] and return one line per input event and per callback.
pub(crate) async fn run(debounce: Duration, throttle: Duration) -> Vec<String> {
    let start = Instant::now();
    let log: Log = Arc::default();

    let debouncer = Debouncer::new(debounce, {
        let log = Arc::clone(&log);
        move |text: String| push(&log, start, "debounce", &text)
    });
    let throttled = Throttle::new(throttle, {
        let log = Arc::clone(&log);
        move |text: String| push(&log, start, "throttle", &text)
    });

    for (offset, text) in KEYSTROKES {
        sleep_until(start + Duration::from_millis(offset)).await;
        push(&log, start, "input", text);
        debouncer.call(text.to_string());
        throttled.call(text.to_string());
    }

    // Let the trailing debounce fire before reporting.
    sleep(debounce + Duration::from_millis(10)).await;
    drop(debouncer);

    log.lock().unwrap_or_else(PoisonError::into_inner).clone()
}
