use crate::error_code::ErrorKind;
use crate::types::RouteError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Parameter or configuration key that caused the error (e.g., "point", "routing.port")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the raw value that failed to parse)
    pub details: Option<String>,
    /// Component that raised the error (e.g., "request_builder", "profile_resolver")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the orchestrator.
///
/// The first three variants are the routing error kinds a client can observe;
/// the rest only occur while loading configuration or writing documents.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{message}")]
    InvalidArgument {
        message: String,
        context: ErrorContext,
    },

    #[error("{message}")]
    PointNotFound {
        message: String,
        point_index: Option<usize>,
    },

    #[error("{message}")]
    EngineFailure {
        message: String,
        details: serde_json::Map<String, serde_json::Value>,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create an invalid-argument error without context.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create an invalid-argument error with structured context
    pub fn invalid_argument_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidArgument {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn point_not_found(msg: impl Into<String>, point_index: usize) -> Self {
        Error::PointNotFound {
            message: msg.into(),
            point_index: Some(point_index),
        }
    }

    pub fn engine_failure(msg: impl Into<String>) -> Self {
        Error::EngineFailure {
            message: msg.into(),
            details: serde_json::Map::new(),
        }
    }

    /// The routing error kind a client sees for this error.
    ///
    /// Configuration, I/O and serialization problems surface as engine failures:
    /// they are never the caller's fault.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::PointNotFound { .. } => ErrorKind::PointNotFound,
            _ => ErrorKind::EngineFailure,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::InvalidArgument { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// Convert into the typed error carried by a failed route outcome.
    pub fn to_route_error(&self) -> RouteError {
        let mut error = RouteError::new(self.kind(), self.to_string());
        match self {
            Error::PointNotFound {
                point_index: Some(idx),
                ..
            } => {
                error = error.with_detail("point_index", *idx);
            }
            Error::EngineFailure { details, .. } => {
                for (k, v) in details {
                    error = error.with_detail(k.clone(), v.clone());
                }
            }
            Error::InvalidArgument { context, .. } => {
                if let Some(field) = &context.field_path {
                    error = error.with_detail("parameter", field.clone());
                }
            }
            _ => {}
        }
        error
    }
}

impl From<Error> for RouteError {
    fn from(err: Error) -> Self {
        err.to_route_error()
    }
}
