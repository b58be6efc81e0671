//! Side-channel observability.
//!
//! The dispatcher reports one [`Event`] per request outcome. Observers are
//! fire-and-forget: they return nothing, and a panicking observer is contained
//! by [`notify`] so the response is unaffected.

use std::panic;

/// The outcome of one request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Event<'a> {
    /// Route name of the collection, e.g. `books`.
    pub collection: &'a str,
    /// Lower-case HTTP method the request arrived with, e.g. `post`.
    pub method: &'a str,
    /// Status code of the envelope returned.
    pub status_code: u16,
    /// Error text, for failures.
    pub detail: Option<&'a str>,
}

impl Event<'_> {
    /// Counter name for this event, e.g. `books.post_count`.
    pub fn metric_name(&self) -> String {
        format!("{}.{}_count", self.collection, self.method)
    }
}

/// Receives request outcomes.
pub trait Observer: Send + Sync {
    /// Record `event`. Must not block for long.
    fn observe(&self, event: &Event<'_>);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&self, _event: &Event<'_>) {}
}

/// Emits each event as a structured `tracing` event.
///
/// 2xx outcomes log at `info`, 4xx at `warn`, 5xx at `error`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &Event<'_>) {
        let metric = event.metric_name();
        let detail = event.detail.unwrap_or_default();
        match event.status_code {
            500.. => tracing::error!(
                collection = event.collection,
                method = event.method,
                status = event.status_code,
                metric = %metric,
                error = detail,
                "request failed"
            ),
            400..=499 => tracing::warn!(
                collection = event.collection,
                method = event.method,
                status = event.status_code,
                metric = %metric,
                error = detail,
                "request rejected"
            ),
            _ => tracing::info!(
                collection = event.collection,
                method = event.method,
                status = event.status_code,
                metric = %metric,
                "request served"
            ),
        }
    }
}

/// Deliver `event` to `observer`, swallowing any panic it raises.
pub fn notify<O: Observer + ?Sized>(observer: &O, event: &Event<'_>) {
    let delivered = panic::catch_unwind(panic::AssertUnwindSafe(|| observer.observe(event)));
    if delivered.is_err() {
        tracing::warn!(collection = event.collection, "observer panicked; event dropped");
    }
}
