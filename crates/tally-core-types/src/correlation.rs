//! Correlation types for matching notary replies to the requests that caused them
//!
//! Every outbound request carries a `RequestId`. The reply echoes it back and the
//! submitter refuses any reply whose id does not match.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh, time-ordered id (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Wrap an id received from the wire
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifies one notarization request and its reply
    RequestId
);

correlation_id!(
    /// Groups every request issued by a single command invocation
    TraceId
);

/// Correlation context for one command invocation
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub trace_id: TraceId,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            trace_id: TraceId::new(),
        }
    }

    /// Continue an existing trace
    pub fn with_trace_id(trace_id: TraceId) -> Self {
        Self { trace_id }
    }

    /// Mint the id for the next request issued in this context
    pub fn next_request_id(&self) -> RequestId {
        RequestId::new()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
