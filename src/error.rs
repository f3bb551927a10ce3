use std::fmt;

/// Errors recorded by the typed accessors on [`MapParams`](crate::MapParams)
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// The requested key was not present in the map
    MissingKey {
        /// Name of the type the caller asked for
        expected: &'static str,
        key: String,
    },
    /// The key was present but its value could not be coerced to the requested type
    TypeMismatch {
        /// Name of the type the caller asked for
        expected: &'static str,
        key: String,
        /// Runtime type name of the value that was found
        actual: &'static str,
        /// Rendered form of the value that was found
        value: String,
    },
}

impl ParamError {
    /// The key whose lookup failed
    pub fn key(&self) -> &str {
        match self {
            ParamError::MissingKey { key, .. } | ParamError::TypeMismatch { key, .. } => key,
        }
    }

    /// The type name the failing accessor was looking for
    pub fn expected(&self) -> &'static str {
        match self {
            ParamError::MissingKey { expected, .. } | ParamError::TypeMismatch { expected, .. } => {
                expected
            }
        }
    }

    pub fn is_missing_key(&self) -> bool {
        matches!(self, ParamError::MissingKey { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ParamError::TypeMismatch { .. })
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamError::MissingKey { expected, key } => write!(
                f,
                "looking for a {} in job.Arg[{}] but key wasn't found",
                expected, key
            ),
            ParamError::TypeMismatch {
                expected,
                key,
                actual,
                value,
            } => write!(
                f,
                "looking for a {} in job.Arg[{}] but value wasn't right type: {}({})",
                expected, key, actual, value
            ),
        }
    }
}

impl std::error::Error for ParamError {}
