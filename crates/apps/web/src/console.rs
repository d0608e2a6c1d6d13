//! `tracing` output for the browser. Each formatted event is handed to a
//! sink along with its level; in the page that sink is `web_sys::console`.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Builds one [`ConsoleWriter`] per event so the level picks the console method.
#[derive(Clone)]
pub struct ConsoleMakeWriter<F> {
    sink: F,
}

impl<F> ConsoleMakeWriter<F>
where
    F: Fn(Level, &str),
{
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<'a, F> MakeWriter<'a> for ConsoleMakeWriter<F>
where
    F: Fn(Level, &str) + 'a,
{
    type Writer = ConsoleWriter<'a, F>;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(&self.sink, Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(&self.sink, *meta.level())
    }
}

/// Buffers one event and emits it as a single console line when dropped.
pub struct ConsoleWriter<'a, F>
where
    F: Fn(Level, &str),
{
    sink: &'a F,
    level: Level,
    buf: Vec<u8>,
}

impl<'a, F> ConsoleWriter<'a, F>
where
    F: Fn(Level, &str),
{
    fn new(sink: &'a F, level: Level) -> Self {
        Self {
            sink,
            level,
            buf: Vec::new(),
        }
    }
}

impl<F> io::Write for ConsoleWriter<'_, F>
where
    F: Fn(Level, &str),
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<F> Drop for ConsoleWriter<'_, F>
where
    F: Fn(Level, &str),
{
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        (self.sink)(self.level, line.trim_end());
    }
}

/// Log level for the page: debug builds keep `debug!` output.
pub fn default_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

#[cfg(target_arch = "wasm32")]
pub fn browser_console(level: Level, line: &str) {
    use wasm_bindgen::JsValue;

    let line = JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::info_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

/// Install the global subscriber. A second call keeps the first one.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    // No clock on wasm32-unknown-unknown; the console stamps lines itself.
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter::new(browser_console))
        .with_max_level(default_level())
        .without_time()
        .try_init();
}
