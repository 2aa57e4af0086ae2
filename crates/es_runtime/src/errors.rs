//! Script visible errors and the fatal error path.

use es_core::EncodingError;

/// Common error message texts.
pub mod messages {
    pub const NOT_A_FUNCTION: &str = "value is not a function";
    pub const NOT_AN_OBJECT: &str = "value is not an object";
    pub const NOT_A_STRING: &str = "value is not a string";
    pub const NOT_AN_ARRAY: &str = "value is not an array";
    pub const STALE_HANDLE: &str = "handle refers to a reclaimed value";
    pub const READ_ONLY: &str = "cannot assign to read only property";
    pub const NOT_EXTENSIBLE: &str = "cannot add property to a non-extensible object";
    pub const NULL_OR_UNDEFINED: &str = "cannot convert undefined or null to object";
    pub const SYMBOL_TO_STRING: &str = "cannot convert a Symbol value to a string";
    pub const SYMBOL_TO_NUMBER: &str = "cannot convert a Symbol value to a number";
    pub const INVALID_ARRAY_LENGTH: &str = "invalid array length";
    pub const INVALID_BUFFER_LENGTH: &str = "invalid array buffer length";
    pub const INVALID_OFFSET: &str = "start offset of typed array is out of bounds";
    pub const INVALID_RADIX: &str = "radix must be between 2 and 36";
    pub const ABSTRACT_TYPED_ARRAY: &str = "TypedArray is an abstract class and cannot be constructed";
}

/// The native error constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Error,
    Eval,
    Range,
    Reference,
    Syntax,
    Type,
    Uri,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Error,
        ErrorKind::Eval,
        ErrorKind::Range,
        ErrorKind::Reference,
        ErrorKind::Syntax,
        ErrorKind::Type,
        ErrorKind::Uri,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::Eval => "EvalError",
            ErrorKind::Range => "RangeError",
            ErrorKind::Reference => "ReferenceError",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Uri => "URIError",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("TypeError: {0}")]
    Type(String),
    #[error("RangeError: {0}")]
    Range(String),
    #[error("ReferenceError: {0}")]
    Reference(String),
    #[error("SyntaxError: {0}")]
    Syntax(String),
    #[error("TypeError: {0}")]
    Encoding(#[from] EncodingError),
}

impl EngineError {
    pub fn type_error(msg: impl Into<String>) -> Self {
        EngineError::Type(msg.into())
    }

    pub fn range_error(msg: impl Into<String>) -> Self {
        EngineError::Range(msg.into())
    }

    /// Constructor used when the error is handed to script code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Type(_) | EngineError::Encoding(_) => ErrorKind::Type,
            EngineError::Range(_) => ErrorKind::Range,
            EngineError::Reference(_) => ErrorKind::Reference,
            EngineError::Syntax(_) => ErrorKind::Syntax,
        }
    }

    pub fn message(&self) -> String {
        match self {
            EngineError::Type(m)
            | EngineError::Range(m)
            | EngineError::Reference(m)
            | EngineError::Syntax(m) => m.clone(),
            EngineError::Encoding(e) => e.to_string(),
        }
    }
}

/// Reports a broken engine invariant and terminates the context.
#[cold]
#[track_caller]
pub fn fatal(msg: &str) -> ! {
    tracing::error!(message = msg, "fatal engine error");
    panic!("fatal engine error: {msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_errors_surface_as_type_errors() {
        let err: EngineError = EncodingError::Truncated { offset: 3 }.into();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.message(), "truncated sequence at offset 3");
        assert_eq!(err.to_string(), "TypeError: truncated sequence at offset 3");
    }

    #[test]
    fn kinds_name_their_constructor() {
        assert_eq!(EngineError::range_error("x").kind().name(), "RangeError");
        assert_eq!(ErrorKind::Uri.name(), "URIError");
    }
}
