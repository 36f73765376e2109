/// Parser-level failures for 5-field cron expressions.
///
/// Every variant names the field it occurred in so that lint output can
/// point the operator at the exact token.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedExpression {
    #[error("cron expr must have 5 fields, got {actual}: {expr:?}")]
    FieldCount { expr: String, actual: usize },

    #[error("{field}: invalid step: {step}")]
    InvalidStep { field: &'static str, step: String },

    #[error("{field}: value out of range: {value} not in [{min},{max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: u32,
        max: u32,
    },

    #[error("{field}: invalid value {token:?}")]
    InvalidValue { field: &'static str, token: String },

    #[error("{field}: field expands to no values")]
    EmptyField { field: &'static str },
}

/// Schedule-shape failures raised when resolving or simulating a
/// schedule. Cron parse errors pass through unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error(transparent)]
    Expression(#[from] MalformedExpression),

    #[error("unknown schedule.kind={kind:?}")]
    UnknownKind { kind: String },

    #[error("{field} missing")]
    MissingParameter { field: &'static str },

    #[error("{field}: timestamp out of range: {ms}")]
    InvalidTimestamp { field: &'static str, ms: i64 },

    #[error("interval must be positive, got {period_ms}ms")]
    NonPositivePeriod { period_ms: i64 },
}
