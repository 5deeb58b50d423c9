use std::sync::Arc;

use crate::{
    color::{translate_color_codes, ChatColor},
    config::{ConfigStore, DynamicValue},
    error::{Failure, ParseError},
};

/// Message templates used when a recognized command fails. Each is read at the moment a failure
/// is translated, so reloaded configuration takes effect immediately.
pub struct Messages {
    /// Sent for unexpected failures.
    pub command_error: Box<dyn DynamicValue<String>>,
    /// Sent when a required parameter is missing. `%s` is replaced by the parameter label.
    pub missing_parameter_error: Box<dyn DynamicValue<String>>,
    /// Sent when a parameter value is invalid. `%s` is replaced by the parameter label.
    pub parameter_error: Box<dyn DynamicValue<String>>,
}

impl Messages {
    /// Reads every template from `store`.
    pub fn from_store(store: &Arc<ConfigStore>) -> Self {
        Messages {
            command_error: Box::new(store.value(|config| config.messages.command_error.clone())),
            missing_parameter_error: Box::new(
                store.value(|config| config.messages.missing_parameter_error.clone()),
            ),
            parameter_error: Box::new(
                store.value(|config| config.messages.parameter_error.clone()),
            ),
        }
    }
}

/// How a dispatch that failed should be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Whether the input was a recognized command and should not reach other consumers.
    pub claimed: bool,
    /// The chat line to send to the sender, already colour-translated.
    pub message: Option<String>,
    /// Whether the failure was unexpected and should be logged for operators.
    pub unexpected: bool,
}

/// Maps a failure onto the answer the sender receives.
///
/// Unmatched input stays silent and unclaimed so that other command handlers can still see it.
/// Every other failure claims the input and produces exactly one message.
pub fn translate(failure: &Failure, messages: &Messages) -> Translation {
    match failure {
        Failure::Parse(ParseError::Unmatched { .. }) => Translation {
            claimed: false,
            message: None,
            unexpected: false,
        },
        Failure::Parse(ParseError::MissingParameter { label }) =>
            claimed(format_template(&messages.missing_parameter_error.get(), label)),
        Failure::Parse(ParseError::InvalidParameter { label, .. }) =>
            claimed(format_template(&messages.parameter_error.get(), label)),
        Failure::Command(error) => Translation {
            claimed: true,
            message: Some(format!("{}{}", ChatColor::Red, error.message())),
            unexpected: false,
        },
        Failure::Unexpected(_) => Translation {
            unexpected: true,
            ..claimed(messages.command_error.get())
        },
    }
}

fn claimed(template: String) -> Translation {
    Translation {
        claimed: true,
        message: Some(translate_color_codes(&template)),
        unexpected: false,
    }
}

/// Substitutes `label` for the first `%s` in `template`. `%%` produces a literal `%`; any other
/// `%` sequence, including a second `%s`, is copied unchanged.
pub fn format_template(template: &str, label: &str) -> String {
    let mut formatted = String::with_capacity(template.len() + label.len());
    let mut substituted = false;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            formatted.push(ch);
            continue;
        }

        match chars.peek() {
            Some('%') => {
                chars.next();
                formatted.push('%');
            }
            Some('s') if !substituted => {
                chars.next();
                formatted.push_str(label);
                substituted = true;
            }
            _ => formatted.push('%'),
        }
    }

    formatted
}
