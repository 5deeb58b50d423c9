use thiserror::Error;

/// Errors raised while resolving tokens against a command tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The tokens do not name a declared command, or arguments were left over.
    #[error("unmatched argument \"{argument}\"")]
    Unmatched {
        /// The first argument which could not be matched.
        argument: String,
    },

    /// A required parameter had no argument to bind to.
    #[error("missing required parameter <{label}>")]
    MissingParameter {
        /// Label of the missing parameter.
        label: String,
    },

    /// An argument was present but could not be converted to the parameter's type.
    #[error("invalid value for parameter <{label}>: {reason}")]
    InvalidParameter {
        /// Label of the offending parameter.
        label: String,
        /// Why conversion failed.
        reason: String,
    },
}

/// A failure signaled by a command's action which should be shown to the sender verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CommandError {
    message: String,
}

impl CommandError {
    /// Creates a command error carrying a user-facing message.
    pub fn new(message: impl Into<String>) -> Self {
        CommandError {
            message: message.into(),
        }
    }

    /// The message shown to the sender.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Everything that can stop a dispatch after tokenization.
#[derive(Debug, Error)]
pub enum Failure {
    /// The parser rejected the tokens.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An action refused to run and told the sender why.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Anything else. Logged for operators, the sender only sees the generic message.
    #[error(transparent)]
    Unexpected(anyhow::Error),
}

// Errors raised through `anyhow` helpers keep their kind, so a `CommandError` returned from a
// helper with `?` still reaches the sender.
impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<CommandError>() {
            Ok(command) => return Failure::Command(command),
            Err(error) => error,
        };

        match error.downcast::<ParseError>() {
            Ok(parse) => Failure::Parse(parse),
            Err(error) => Failure::Unexpected(error),
        }
    }
}

/// Errors raised while loading or reloading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {path}")]
    Io {
        /// Path of the file being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised when a command tree is built into a parser.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// Two sibling commands share a name or alias.
    #[error("command name \"{0}\" is declared more than once")]
    DuplicateName(String),

    /// A required parameter follows an optional one and could never be bound.
    #[error("required parameter <{param}> of \"{command}\" follows an optional parameter")]
    RequiredAfterOptional {
        /// The command declaring the parameters.
        command: String,
        /// Label of the misplaced required parameter.
        param: String,
    },

    /// Two parameters of one command share a label.
    #[error("parameter <{param}> of \"{command}\" is declared more than once")]
    DuplicateParam {
        /// The command declaring the parameters.
        command: String,
        /// Label declared twice.
        param: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_errors_survive_anyhow() {
        let error = anyhow::Error::from(CommandError::new("Not enough permissions"));
        match Failure::from(error) {
            Failure::Command(command) => assert_eq!(command.message(), "Not enough permissions"),
            other => panic!("unexpected failure: {:?}", other),
        }
    }

    #[test]
    fn parse_errors_survive_anyhow() {
        let error = anyhow::Error::from(ParseError::MissingParameter {
            label: "item".to_owned(),
        });
        assert!(matches!(
            Failure::from(error),
            Failure::Parse(ParseError::MissingParameter { label }) if label == "item"
        ));
    }

    #[test]
    fn other_errors_are_unexpected() {
        let failure = Failure::from(anyhow::anyhow!("storage offline"));
        assert!(matches!(failure, Failure::Unexpected(_)));
        assert_eq!(failure.to_string(), "storage offline");
    }
}
