//! Per-call context supplied by the host: who is calling and when.

/// Caller identity and timestamp for one operation. The core trusts both verbatim.
pub trait CallContext: Send + Sync {
    fn caller_identity(&self) -> &str;
    fn timestamp(&self) -> u64;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub caller: String,
    pub timestamp: u64,
}

impl RequestContext {
    pub fn new(caller: impl Into<String>, timestamp: u64) -> Self {
        Self { caller: caller.into(), timestamp }
    }
}

impl CallContext for RequestContext {
    fn caller_identity(&self) -> &str { &self.caller }
    fn timestamp(&self) -> u64 { self.timestamp }
}
