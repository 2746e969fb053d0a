//! error types
//!
//! structured errors for config, schema loading, model construction, and
//! text emission.

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for schema loading and code generation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    SchemaParse(#[from] graphql_parser::schema::ParseError),

    #[error("schema http error: {status}")]
    SchemaHttp {
        /// http status of the schema response
        status: u16,
        /// raw response body
        body: String,
    },

    #[error("invalid fetchable type '{type_name}': {reason}")]
    InvalidFetchableType {
        /// offending type
        type_name: String,
        /// violated rule
        reason: String,
    },

    #[error("unknown type '{type_name}' referenced by {context}")]
    UnknownType {
        /// unresolved type name
        type_name: String,
        /// where the reference was found
        context: String,
    },

    #[error("invalid extension of '{type_name}': {reason}")]
    InvalidExtension {
        /// extended type
        type_name: String,
        /// why the extension cannot be merged
        reason: String,
    },

    #[error("unknown scalar type '{0}' (add it to the scalar type map)")]
    UnknownScalar(String),

    #[error("writer's importing has been terminated")]
    ImportsFinalized,
}

impl Error {
    pub(crate) fn invalid_type(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidFetchableType {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// true if the error points at the input schema rather than the generator
    pub fn is_authoring_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidFetchableType { .. }
                | Error::UnknownType { .. }
                | Error::InvalidExtension { .. }
                | Error::SchemaParse(_)
        )
    }

    /// true if the error indicates a defect in an emitter
    pub fn is_generator_defect(&self) -> bool {
        matches!(self, Error::ImportsFinalized | Error::UnknownScalar(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = Error::invalid_type("UserConnection", "missing `edges`");
        assert!(err.is_authoring_error());
        assert!(!err.is_generator_defect());
        assert_eq!(
            err.to_string(),
            "invalid fetchable type 'UserConnection': missing `edges`"
        );

        assert!(Error::ImportsFinalized.is_generator_defect());
        assert!(Error::UnknownScalar("Json".to_string()).is_generator_defect());

        let err = Error::Io(std::io::Error::other("disk full"));
        assert!(!err.is_authoring_error());
        assert!(!err.is_generator_defect());
    }
}
