/// Delivery target for named events produced by background executions.
///
/// Injected into the launcher at construction; implementations bridge to
/// whatever eventing fabric the host uses (UI runtime, message bus, test
/// channel). Event names are caller-supplied per invocation.
pub trait EventSink: Send + Sync {
    /// Deliver one event. `payload` is a single output line for output
    /// events and empty for completion events.
    fn emit(&self, event: &str, payload: &str);
}

/// Sink that discards everything. Useful when a caller only wants the
/// side effects of an execution.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &str, _payload: &str) {}
}
