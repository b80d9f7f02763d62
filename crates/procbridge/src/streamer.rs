use procbridge_core::EventSink;
use std::io::BufRead;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Decodes a process's combined output into lines and forwards each one to
/// the event sink until a configured keyword suppresses further delivery.
///
/// The stream is the single shared pipe both stdout and stderr write into,
/// so lines arrive in the order the process produced them. Suppressed lines
/// are still consumed so the producer never blocks on a full pipe. The
/// streamer finishes at end-of-data; it never waits for process exit.
pub struct OutputStreamer {
    sink: Arc<dyn EventSink>,
    event: String,
    stop_keyword: String,
    suppressed: bool,
}

impl OutputStreamer {
    pub fn new(
        sink: Arc<dyn EventSink>,
        event: impl Into<String>,
        stop_keyword: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            event: event.into(),
            stop_keyword: stop_keyword.into(),
            suppressed: false,
        }
    }

    /// Consume the output stream to end-of-data, delivering lines as they
    /// arrive. Blocking; runs on a dedicated blocking task.
    pub fn stream<R: BufRead>(mut self, reader: R) {
        for line in reader.lines() {
            match line {
                Ok(line) => self.deliver(&line),
                Err(e) => {
                    warn!(event = %self.event, error = %e, "Failed reading output stream");
                    break;
                }
            }
        }
    }

    fn deliver(&mut self, line: &str) {
        if self.suppressed {
            return;
        }

        self.sink.emit(&self.event, line);

        if !self.stop_keyword.is_empty() && line.contains(&self.stop_keyword) {
            info!(event = %self.event, "Stop keyword observed, suppressing further output");
            self.suppressed = true;
        }
    }
}

/// The two independent observers of one background execution: the output
/// drainer and the exit waiter. They share no state and finish in either
/// order; the session is over when both have completed.
pub struct StreamSession {
    pub(crate) drainer: Option<JoinHandle<()>>,
    pub(crate) exit_waiter: JoinHandle<()>,
}

impl StreamSession {
    /// Let both observers run to completion on their own
    pub fn detach(self) {}

    /// Wait until both observers have finished
    pub async fn closed(self) {
        if let Some(drainer) = self.drainer {
            let _ = drainer.await;
        }
        let _ = self.exit_waiter.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink {
        events: Mutex<Vec<(String, String)>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(Vec::new()),
            })
        }

        fn lines(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|(_, payload)| payload.clone())
                .collect()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: &str, payload: &str) {
            self.events
                .lock()
                .unwrap()
                .push((event.to_string(), payload.to_string()));
        }
    }

    #[test]
    fn test_delivers_every_line_without_keyword() {
        let sink = RecordingSink::new();
        let streamer = OutputStreamer::new(sink.clone(), "out", "");

        streamer.stream(&b"one\ntwo\nthree\n"[..]);

        assert_eq!(sink.lines(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_keyword_line_is_delivered_then_suppresses() {
        let sink = RecordingSink::new();
        let streamer = OutputStreamer::new(sink.clone(), "out", "STOP");

        streamer.stream(&b"A\nB\nSTOP\nC\nD\n"[..]);

        assert_eq!(sink.lines(), vec!["A", "B", "STOP"]);
    }

    #[test]
    fn test_keyword_matches_as_substring() {
        let sink = RecordingSink::new();
        let streamer = OutputStreamer::new(sink.clone(), "out", "ready");

        streamer.stream(&b"booting\nprovider ready, serving\nextra\n"[..]);

        assert_eq!(sink.lines(), vec!["booting", "provider ready, serving"]);
    }

    #[test]
    fn test_lines_keep_stream_order() {
        let sink = RecordingSink::new();
        let streamer = OutputStreamer::new(sink.clone(), "out", "");

        streamer.stream(&b"stdout one\nstderr one\nstdout two\n"[..]);

        assert_eq!(
            sink.lines(),
            vec!["stdout one", "stderr one", "stdout two"]
        );
    }

    #[test]
    fn test_missing_trailing_newline_still_yields_line() {
        let sink = RecordingSink::new();
        let streamer = OutputStreamer::new(sink.clone(), "out", "");

        streamer.stream(&b"partial"[..]);

        assert_eq!(sink.lines(), vec!["partial"]);
    }

    #[tokio::test]
    async fn test_session_closed_waits_for_both_observers() {
        let session = StreamSession {
            drainer: Some(tokio::spawn(async {})),
            exit_waiter: tokio::spawn(async {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }),
        };

        session.closed().await;
    }
}
