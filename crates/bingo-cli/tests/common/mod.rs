//! Shared test helpers for app integration tests.
#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bingo_cli::app::App;
use bingo_cli::config::AppConfig;
use bingo_cli::terminal::Console;
use bingo_test_support::MockRng;

/// In-memory writer that can be inspected after the console wrote to it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Build an app over `[from, to]` with the default timings and a `MockRng`,
/// so every pick is the lowest available number.
pub fn build_test_app(from: i32, to: i32) -> (App, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let config = AppConfig {
        from,
        to,
        ..AppConfig::default()
    };
    let console = Arc::new(Console::new(Box::new(buffer.clone())));
    let app = App::with_rng(&config, console, Box::new(MockRng));
    (app, buffer)
}

/// Let paused time run forward.
pub async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
