use crate::model::IdentifierRole;
use tally_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using NotaryError
pub type Result<T> = std::result::Result<T, NotaryError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by a command maps to exactly one kind, and every kind
/// has a stable code that callers and tests can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input validation
    InvalidIdentifier,
    MalformedAmount,
    AmountOutOfRange,
    InvalidInput,

    // Pre-submission checks
    KeyUnavailable,

    // Notary round trip
    TransportFailure,
    Timeout,
    ServerRejected,
    MalformedReply,
    MissingTransaction,
    InstrumentExtractionFailed,

    // Post-commit (non-fatal)
    ArchivalWarning,

    // Local state
    NotFound,
    Persistence,
    Serialization,
    Io,

    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidIdentifier => "ERR_INVALID_IDENTIFIER",
            ExErrorKind::MalformedAmount => "ERR_MALFORMED_AMOUNT",
            ExErrorKind::AmountOutOfRange => "ERR_AMOUNT_OUT_OF_RANGE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::KeyUnavailable => "ERR_KEY_UNAVAILABLE",
            ExErrorKind::TransportFailure => "ERR_TRANSPORT_FAILURE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::ServerRejected => "ERR_SERVER_REJECTED",
            ExErrorKind::MalformedReply => "ERR_MALFORMED_REPLY",
            ExErrorKind::MissingTransaction => "ERR_MISSING_TRANSACTION",
            ExErrorKind::InstrumentExtractionFailed => "ERR_INSTRUMENT_EXTRACTION_FAILED",
            ExErrorKind::ArchivalWarning => "ERR_ARCHIVAL_WARNING",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the failure happened before anything was sent to the notary
    pub fn is_pre_submission(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidIdentifier
                | ExErrorKind::MalformedAmount
                | ExErrorKind::AmountOutOfRange
                | ExErrorKind::InvalidInput
                | ExErrorKind::KeyUnavailable
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (stage, role, offending
/// input, server status code, correlation ids) to produce a diagnostic that
/// names where the command stopped and why.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    role: Option<String>,
    input: Option<String>,
    server_code: Option<i32>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            role: None,
            input: None,
            server_code: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation (pipeline stage) context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the role label of the offending identifier
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Add the offending caller input
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Add the status code the notary answered with
    pub fn with_server_code(mut self, code: i32) -> Self {
        self.server_code = Some(code);
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn server_code(&self) -> Option<i32> {
        self.server_code
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in stage '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(role) = &self.role {
            write!(f, " (role: {})", role)?;
        }
        if let Some(input) = &self.input {
            write!(f, " (input: {:?})", input)?;
        }
        if let Some(code) = self.server_code {
            write!(f, " (server code: {})", code)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Pipeline stage names, used as the `op` of errors and log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateIdentifier,
    ParseAmount,
    CheckKey,
    Submit,
    InterpretReply,
    Archive,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ValidateIdentifier => "validate_identifier",
            Stage::ParseAmount => "parse_amount",
            Stage::CheckKey => "check_key",
            Stage::Submit => "submit",
            Stage::InterpretReply => "interpret_reply",
            Stage::Archive => "archive",
        }
    }
}

/// The post-commit step an archival warning came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivalStep {
    SelfArchival,
    AccountRefresh,
}

impl std::fmt::Display for ArchivalStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchivalStep::SelfArchival => f.write_str("self-archival"),
            ArchivalStep::AccountRefresh => f.write_str("account refresh"),
        }
    }
}

/// Errors of the voucher issuance protocol
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotaryError {
    // ===== Input =====
    /// Identifier is empty, malformed or unknown to the wallet for its role
    #[error("Invalid identifier for {role}: {id:?}")]
    InvalidIdentifier { role: IdentifierRole, id: String },

    /// Amount text is not a number
    #[error("Malformed amount: {input:?}")]
    MalformedAmount { input: String },

    /// Amount parsed but violates the account's asset rules
    #[error("Amount out of range: {input:?} ({reason})")]
    AmountOutOfRange { input: String, reason: String },

    // ===== Pre-submission =====
    /// Counterparty public encryption key could not be loaded or retrieved
    #[error("Cannot load public key for nym {nym}")]
    KeyUnavailable { nym: String },

    // ===== Round trip =====
    /// Request could not be delivered or no correlated reply arrived
    #[error("Transport failure: {reason}")]
    TransportFailure { reason: String },

    /// Notary answered with a failure status
    #[error("Server rejected the request with code {code}")]
    ServerRejected { code: i32 },

    /// Success reply without a usable ledger
    #[error("Malformed reply: {reason}")]
    MalformedReply { reason: String },

    /// Ledger has no issuance transaction at the expected index
    #[error("Cannot retrieve transaction at index {index}")]
    MissingTransaction { index: usize },

    /// Transaction carries no instrument, or it does not decode
    #[error("Cannot load instrument: {reason}")]
    InstrumentExtractionFailed { reason: String },

    // ===== Post-commit =====
    /// A best-effort step after a committed issuance failed
    #[error("Post-commit {step} failed: {reason}")]
    ArchivalWarning { step: ArchivalStep, reason: String },
}

impl NotaryError {
    /// The pipeline stage that produces this error
    pub fn stage(&self) -> Stage {
        match self {
            NotaryError::InvalidIdentifier { .. } => Stage::ValidateIdentifier,
            NotaryError::MalformedAmount { .. } | NotaryError::AmountOutOfRange { .. } => {
                Stage::ParseAmount
            }
            NotaryError::KeyUnavailable { .. } => Stage::CheckKey,
            NotaryError::TransportFailure { .. } => Stage::Submit,
            NotaryError::ServerRejected { .. }
            | NotaryError::MalformedReply { .. }
            | NotaryError::MissingTransaction { .. }
            | NotaryError::InstrumentExtractionFailed { .. } => Stage::InterpretReply,
            NotaryError::ArchivalWarning { .. } => Stage::Archive,
        }
    }

    /// Only archival warnings are non-fatal
    pub fn is_fatal(&self) -> bool {
        !matches!(self, NotaryError::ArchivalWarning { .. })
    }
}

/// Conversion from NotaryError to ExError
impl From<NotaryError> for ExError {
    fn from(err: NotaryError) -> Self {
        let stage = err.stage().as_str();
        let message = err.to_string();
        match err {
            NotaryError::InvalidIdentifier { role, id } => {
                ExError::new(ExErrorKind::InvalidIdentifier)
                    .with_op(stage)
                    .with_role(role.label())
                    .with_input(id)
                    .with_message(message)
            }
            NotaryError::MalformedAmount { input } => ExError::new(ExErrorKind::MalformedAmount)
                .with_op(stage)
                .with_role("amount")
                .with_input(input)
                .with_message(message),
            NotaryError::AmountOutOfRange { input, .. } => {
                ExError::new(ExErrorKind::AmountOutOfRange)
                    .with_op(stage)
                    .with_role("amount")
                    .with_input(input)
                    .with_message(message)
            }
            NotaryError::KeyUnavailable { nym } => ExError::new(ExErrorKind::KeyUnavailable)
                .with_op(stage)
                .with_role(IdentifierRole::HisNym.label())
                .with_input(nym)
                .with_message(message),
            NotaryError::TransportFailure { .. } => ExError::new(ExErrorKind::TransportFailure)
                .with_op(stage)
                .with_message(message),
            NotaryError::ServerRejected { code } => ExError::new(ExErrorKind::ServerRejected)
                .with_op(stage)
                .with_server_code(code)
                .with_message(message),
            NotaryError::MalformedReply { .. } => ExError::new(ExErrorKind::MalformedReply)
                .with_op(stage)
                .with_message(message),
            NotaryError::MissingTransaction { .. } => {
                ExError::new(ExErrorKind::MissingTransaction)
                    .with_op(stage)
                    .with_message(message)
            }
            NotaryError::InstrumentExtractionFailed { .. } => {
                ExError::new(ExErrorKind::InstrumentExtractionFailed)
                    .with_op(stage)
                    .with_message(message)
            }
            NotaryError::ArchivalWarning { .. } => ExError::new(ExErrorKind::ArchivalWarning)
                .with_op(stage)
                .with_message(message),
        }
    }
}

/// Conversion from serde_json::Error to ExError
impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
