use std::{any::Any, collections::HashSet, fmt, sync::Arc};

use crate::{
    arg::{ArgumentTraverser, FromArgument},
    error::{DefinitionError, Failure, ParseError},
    invocation::{Action, Args, ExecContext, Invocation},
    output::Output,
    registry::Registry,
};

/// Resolves a tokenized command line into the invocations it names.
pub trait CommandParser: Send + Sync {
    /// Parses `tokens`. An empty result means nothing matched and nothing should run.
    fn parse(&self, tokens: &[&str]) -> Result<Vec<Invocation>, ParseError>;
}

/// A set of declared commands which can be built into a parser.
pub trait CommandDefinition: Send + Sync {
    /// The parser produced by [`build`](CommandDefinition::build).
    type Parser: CommandParser;

    /// Builds a parser, giving the definitions access to application services.
    fn build(&self, registry: &Arc<Registry>) -> anyhow::Result<Self::Parser>;
}

type Converter = fn(&str) -> Result<Box<dyn Any + Send + Sync>, String>;

fn convert<T: FromArgument>(arg: &str) -> Result<Box<dyn Any + Send + Sync>, String> {
    T::from_arg(arg).map(|value| Box::new(value) as Box<dyn Any + Send + Sync>)
}

/// A positional parameter of a command.
#[derive(Clone)]
pub struct Param {
    label: String,
    required: bool,
    convert: Converter,
    type_name: &'static str,
}

impl Param {
    /// A parameter which must be supplied.
    pub fn required<T: FromArgument>(label: impl Into<String>) -> Self {
        Param {
            label: label.into(),
            required: true,
            convert: convert::<T>,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// A parameter which may be left off the end of the command line.
    pub fn optional<T: FromArgument>(label: impl Into<String>) -> Self {
        Param {
            required: false,
            ..Self::required::<T>(label)
        }
    }

    /// The label shown to users in error messages.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the parameter must be supplied.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("label", &self.label)
            .field("required", &self.required)
            .field("type", &self.type_name)
            .finish()
    }
}

/// A declared command: a name, positional parameters, subcommands and an optional action.
#[derive(Clone, Debug)]
pub struct Command {
    name: String,
    aliases: Vec<String>,
    params: Vec<Param>,
    subcommands: Vec<Command>,
    action: Action,
}

impl Command {
    /// Declares a command with no parameters and no action.
    pub fn new(name: impl Into<String>) -> Self {
        Command {
            name: name.into(),
            aliases: Vec::new(),
            params: Vec::new(),
            subcommands: Vec::new(),
            action: Action::None,
        }
    }

    /// Adds an alternative name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Appends a positional parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Adds a subcommand.
    pub fn subcommand(mut self, command: Command) -> Self {
        self.subcommands.push(command);
        self
    }

    /// Sets an action which runs for its side effects only.
    pub fn executes<F>(mut self, run: F) -> Self
    where F: Fn(&ExecContext<'_>) -> Result<(), Failure> + Send + Sync + 'static {
        self.action = Action::Run(Arc::new(run));
        self
    }

    /// Sets an action whose return value is sent back to the sender.
    pub fn returns<F, O>(mut self, call: F) -> Self
    where
        F: Fn(&ExecContext<'_>) -> Result<O, Failure> + Send + Sync + 'static,
        O: Into<Output>,
    {
        self.action = Action::Call(Arc::new(
            move |context: &ExecContext<'_>| -> Result<Output, Failure> {
                call(context).map(Into::into)
            },
        ));
        self
    }

    /// The canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `token` is this command's name or one of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|alias| alias == token)
    }

    fn find_subcommand(&self, token: &str) -> Option<&Command> {
        self.subcommands.iter().find(|command| command.matches(token))
    }

    fn validate(&self) -> Result<(), DefinitionError> {
        let mut labels = HashSet::new();
        let mut seen_optional = false;
        for param in &self.params {
            if !labels.insert(param.label.as_str()) {
                return Err(DefinitionError::DuplicateParam {
                    command: self.name.clone(),
                    param: param.label.clone(),
                });
            }

            if param.required && seen_optional {
                return Err(DefinitionError::RequiredAfterOptional {
                    command: self.name.clone(),
                    param: param.label.clone(),
                });
            }
            seen_optional |= !param.required;
        }

        validate_siblings(&self.subcommands)
    }
}

fn validate_siblings(commands: &[Command]) -> Result<(), DefinitionError> {
    let mut names = HashSet::new();
    for command in commands {
        for name in std::iter::once(&command.name).chain(&command.aliases) {
            if !names.insert(name.as_str()) {
                return Err(DefinitionError::DuplicateName(name.clone()));
            }
        }
        command.validate()?;
    }
    Ok(())
}

/// The top-level set of declared commands.
#[derive(Clone, Debug, Default)]
pub struct CommandTree {
    commands: Vec<Command>,
}

impl CommandTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level command.
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// The declared top-level commands.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

impl CommandDefinition for CommandTree {
    type Parser = CommandLine;

    fn build(&self, registry: &Arc<Registry>) -> anyhow::Result<CommandLine> {
        validate_siblings(&self.commands)?;
        Ok(CommandLine {
            commands: self.commands.clone().into(),
            registry: Arc::clone(registry),
        })
    }
}

/// A parser built from a [`CommandTree`]. Immutable once built.
#[derive(Debug)]
pub struct CommandLine {
    commands: Arc<[Command]>,
    registry: Arc<Registry>,
}

impl CommandParser for CommandLine {
    fn parse(&self, tokens: &[&str]) -> Result<Vec<Invocation>, ParseError> {
        let mut args = ArgumentTraverser::new(tokens);
        let first = match args.next() {
            Some(token) => token,
            None => return Ok(Vec::new()),
        };

        let mut current = self
            .commands
            .iter()
            .find(|command| command.matches(first))
            .ok_or_else(|| ParseError::Unmatched {
                argument: first.to_owned(),
            })?;

        let mut invocations = Vec::new();
        loop {
            let mut bound = Args::default();
            let mut params = current.params.iter();
            let mut descend = None;

            // A subcommand name takes precedence over binding the token to a parameter
            while let Some(token) = args.next() {
                if let Some(subcommand) = current.find_subcommand(token) {
                    descend = Some(subcommand);
                    break;
                }

                let param = params.next().ok_or_else(|| ParseError::Unmatched {
                    argument: token.to_owned(),
                })?;
                let value =
                    (param.convert)(token).map_err(|reason| ParseError::InvalidParameter {
                        label: param.label.clone(),
                        reason,
                    })?;
                bound.insert(&param.label, value);
            }

            if let Some(missing) = params.find(|param| param.required) {
                return Err(ParseError::MissingParameter {
                    label: missing.label.clone(),
                });
            }

            invocations.push(Invocation::new(
                current.name.clone(),
                bound,
                current.action.clone(),
                Arc::clone(&self.registry),
            ));

            match descend {
                Some(subcommand) => current = subcommand,
                None => break,
            }
        }

        Ok(invocations)
    }
}
