//! Canonical field keys and event names for structured logging

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Wallet identifiers
pub const FIELD_SERVER_ID: &str = "server_id";
pub const FIELD_NYM_ID: &str = "nym_id";
pub const FIELD_ACCOUNT_ID: &str = "account_id";
pub const FIELD_RECIPIENT_ID: &str = "recipient_id";
pub const FIELD_INSTRUMENT_ID: &str = "instrument_id";

// Pipeline
pub const FIELD_STAGE: &str = "stage";
pub const FIELD_WARNINGS: &str = "warnings";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_WARNING: &str = "warning";
