use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::convert::{format_bb, DisplayMode};
use crate::models::BbState;

/// Render target for the display loop. The graphical overlay lives behind
/// this trait in the embedding application; the crate ships a terminal sink.
pub trait DisplaySink {
    fn render(&mut self, state: &BbState);
}

/// Prints the latest converted state as a single terminal line.
pub struct TerminalSink {
    mode: DisplayMode,
}

impl TerminalSink {
    pub fn new(mode: DisplayMode) -> Self {
        Self { mode }
    }
}

impl DisplaySink for TerminalSink {
    fn render(&mut self, state: &BbState) {
        // Sorted names keep the layout stable between refreshes.
        let mut names: Vec<&String> = state.stacks_bb.keys().collect();
        names.sort();
        let stacks = names
            .iter()
            .map(|name| format!("{name} {}", format_bb(state.stacks_bb[*name], self.mode)))
            .collect::<Vec<_>>()
            .join("  ");
        println!("pot {}  |  {stacks}", format_bb(state.pot_bb, self.mode));
    }
}

/// Pull-based refresh loop over the orchestrator's latest-result cell.
///
/// Paced independently of capture and processing: it only ever observes the
/// most recent published state and may skip intermediate ones. During
/// transient pipeline failures it keeps showing the last good state.
pub struct DisplayLoop<F>
where
    F: Fn() -> Option<BbState>,
{
    get_state: F,
    refresh_interval: Duration,
    stop: Arc<AtomicBool>,
}

impl<F> DisplayLoop<F>
where
    F: Fn() -> Option<BbState>,
{
    pub fn new(get_state: F, refresh_hz: u32) -> Self {
        let refresh_hz = refresh_hz.max(1);
        Self {
            get_state,
            refresh_interval: Duration::from_secs_f64(1.0 / f64::from(refresh_hz)),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that ends [`run`](DisplayLoop::run); hand it to a signal handler.
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Blocking refresh loop, driven on the caller's thread. Re-renders only
    /// when the published state actually changed.
    pub fn run(&self, sink: &mut dyn DisplaySink) {
        let mut last_rendered: Option<BbState> = None;
        while !self.stop.load(Ordering::SeqCst) {
            if let Some(state) = (self.get_state)() {
                if last_rendered.as_ref() != Some(&state) {
                    sink.render(&state);
                    last_rendered = Some(state);
                }
            }
            thread::sleep(self.refresh_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct RecordingSink {
        rendered: Vec<BbState>,
    }

    impl DisplaySink for RecordingSink {
        fn render(&mut self, state: &BbState) {
            self.rendered.push(state.clone());
        }
    }

    fn state(pot_bb: f64) -> BbState {
        BbState {
            pot_bb,
            stacks_bb: HashMap::from([("Alice".to_string(), 50.0)]),
        }
    }

    #[test]
    fn renders_once_per_distinct_state() {
        let published = Arc::new(Mutex::new(Some(state(1.0))));
        let source = Arc::clone(&published);
        let display = DisplayLoop::new(move || source.lock().unwrap().clone(), 200);
        let stop = display.stop_signal();

        let mut sink = RecordingSink { rendered: Vec::new() };
        let publisher = Arc::clone(&published);
        let stopper = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(40));
            *publisher.lock().unwrap() = Some(state(2.0));
            thread::sleep(Duration::from_millis(40));
            stopper.store(true, Ordering::SeqCst);
        });
        display.run(&mut sink);
        handle.join().unwrap();

        let pots: Vec<f64> = sink.rendered.iter().map(|s| s.pot_bb).collect();
        assert_eq!(pots, vec![1.0, 2.0]);
    }

    #[test]
    fn empty_cell_renders_nothing() {
        let display = DisplayLoop::new(|| None, 200);
        let stop = display.stop_signal();
        let stopper = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            stopper.store(true, Ordering::SeqCst);
        });
        let mut sink = RecordingSink { rendered: Vec::new() };
        display.run(&mut sink);
        handle.join().unwrap();
        assert!(sink.rendered.is_empty());
    }

    #[test]
    fn terminal_sink_formats_sorted_stacks() {
        // Smoke test: rendering must not panic on an empty state.
        let mut sink = TerminalSink::new(DisplayMode::Decimal);
        sink.render(&BbState::default());
        sink.render(&state(3.5));
    }
}
