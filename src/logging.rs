//! `tracing` output routed to the browser console.
//!
//! The fmt subscriber renders each event into a [`ConsoleWriter`]; the writer
//! hands the finished line to `console.log` / `console.warn` / `console.error`
//! according to the event level. On native targets (tests) lines go to stderr.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init(max_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .without_time()
        .with_ansi(false)
        .with_writer(ConsoleMakeWriter)
        .try_init()
        .is_ok()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event; emitted on flush or drop.
pub struct ConsoleWriter {
    // Native builds print everything to stderr regardless of level.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::with_capacity(128),
        }
    }

    fn emit(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        #[cfg(target_arch = "wasm32")]
        {
            let msg = wasm_bindgen::JsValue::from_str(line);
            match self.level {
                Level::ERROR => web_sys::console::error_1(&msg),
                Level::WARN => web_sys::console::warn_1(&msg),
                Level::DEBUG | Level::TRACE => web_sys::console::debug_1(&msg),
                _ => web_sys::console::log_1(&msg),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{line}");
        self.buf.clear();
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        self.emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_picks_event_level() {
        let mw = ConsoleMakeWriter;
        assert_eq!(mw.make_writer().level, Level::INFO);
    }

    #[test]
    fn flush_drains_buffer() {
        let mut w = ConsoleWriter::new(Level::WARN);
        write!(w, "carrot field ready").unwrap();
        assert!(!w.buf.is_empty());
        w.flush().unwrap();
        assert!(w.buf.is_empty());
    }

    #[test]
    fn second_init_reports_existing_subscriber() {
        init(Level::DEBUG);
        assert!(!init(Level::DEBUG));
    }
}
