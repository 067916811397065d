use thiserror::Error;

/// Crate-wide result type for section parsing.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A configuration fault scoped to one section.
///
/// Always recoverable: the caller reports the fault, skips the section, and
/// continues with the remaining sections.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A key marked required by its field spec is absent.
    #[error("section '{section}' is missing required key '{key}'")]
    MissingRequired { section: String, key: String },

    /// The `type` key names no registered connector.
    #[error("section '{section}' has an unknown connector type '{kind}'")]
    UnknownType { section: String, kind: String },

    /// A yes/no key holds something other than the literal `yes` or `no`.
    #[error("key '{key}' in section '{section}' must be either 'yes' or 'no'")]
    InvalidBoolean { section: String, key: String },

    /// The section is named after a reserved token.
    #[error("'{name}' is a reserved section name")]
    ReservedName { name: String },
}

impl ConfigError {
    #[must_use]
    pub fn missing_required(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingRequired {
            section: section.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn unknown_type(section: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnknownType {
            section: section.into(),
            kind: kind.into(),
        }
    }

    #[must_use]
    pub fn invalid_boolean(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self::InvalidBoolean {
            section: section.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Self::ReservedName { name: name.into() }
    }
}

/// A fault reading the configuration file itself.
///
/// Unlike [`ConfigError`], these are not scoped to a section; without a
/// readable file there is nothing to start.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("config syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl LoadError {
    #[must_use]
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}
