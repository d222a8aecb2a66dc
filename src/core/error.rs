use thiserror::Error;

/// Failure to load the reference data. Nothing is published when a build
/// fails, so the build may be attempted again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("failed to read {name} data: {reason}")]
    Unreadable { name: String, reason: String },

    #[error("encountered parsing errors in {name} data at record {record}: {reason}")]
    Parse {
        name: String,
        record: u64,
        reason: String,
    },
}

/// A requested identifier or conversion target that does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the {field} with value \"{value}\" is not valid")]
pub struct InvalidReference {
    pub field: &'static str,
    pub value: String,
}

impl InvalidReference {
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reference_message_names_field_and_value() {
        let err = InvalidReference::new("slug", "dogecoin");
        assert_eq!(err.to_string(), "the slug with value \"dogecoin\" is not valid");
    }
}
