//! Error types for volume specification parsing.

use crate::parser::split_userinfo;

/// Shown in place of the access key wherever a specification is displayed.
const REDACTED: &str = "<redacted>";

/// Why the overall structure of a specification was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatIssue {
    #[error("no '@' between the credentials and the share")]
    MissingAt,

    #[error("found {count} ':' characters, at most 2 are allowed")]
    TooManyColons { count: usize },

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

/// Errors returned when a volume specification cannot be parsed.
///
/// Every variant carries the specification it was raised for. Displaying the
/// error replaces the access key with `<redacted>`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid volume specification {}: {}", redact_spec(.spec), .reason)]
    InvalidFormat {
        spec: String,
        #[source]
        reason: FormatIssue,
    },

    #[error("volume specification {} does not include a storage username", redact_spec(.spec))]
    MissingUsername { spec: String },

    #[error("volume specification {} does not include a storage key", redact_spec(.spec))]
    MissingKey { spec: String },

    #[error("volume specification {} does not include a storage file share", redact_spec(.spec))]
    MissingShare { spec: String },
}

impl ParseError {
    pub(crate) fn invalid_format(spec: &str, reason: impl Into<FormatIssue>) -> Self {
        ParseError::InvalidFormat {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    /// The raw specification that failed to parse.
    ///
    /// Unlike the `Display` output this still contains the access key.
    pub fn spec(&self) -> &str {
        match self {
            ParseError::InvalidFormat { spec, .. }
            | ParseError::MissingUsername { spec }
            | ParseError::MissingKey { spec }
            | ParseError::MissingShare { spec } => spec,
        }
    }
}

/// Quote a specification with the key part of its userinfo redacted.
///
/// The userinfo ends where the URL parser ends it, so an `@` inside the key
/// is redacted along with the rest of the key.
pub(crate) fn redact_spec(spec: &str) -> String {
    let redacted = match split_userinfo(spec) {
        Some((userinfo, rest)) => match userinfo.split_once(':') {
            Some((username, key)) if !key.is_empty() => {
                format!("{}:{}@{}", username, REDACTED, rest)
            }
            _ => spec.to_string(),
        },
        None => spec.to_string(),
    };
    format!("{:?}", redacted)
}
