use std::{any::Any, collections::HashMap, fmt, sync::Arc};

use crate::{error::Failure, output::Output, registry::Registry, sender::CommandSender};

/// A side-effect-only action.
pub type RunFn = dyn Fn(&ExecContext<'_>) -> Result<(), Failure> + Send + Sync;

/// An action whose result is shown to the sender.
pub type CallFn = dyn Fn(&ExecContext<'_>) -> Result<Output, Failure> + Send + Sync;

/// What a resolved command does when executed.
#[derive(Clone, Default)]
pub enum Action {
    /// The command only groups subcommands.
    #[default]
    None,
    /// Run for side effects.
    Run(Arc<RunFn>),
    /// Run and emit the returned [`Output`].
    Call(Arc<CallFn>),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::None => f.write_str("None"),
            Action::Run(_) => f.write_str("Run(..)"),
            Action::Call(_) => f.write_str("Call(..)"),
        }
    }
}

/// Converted parameter values of one invocation, keyed by label. Optional parameters that were
/// not supplied are absent.
#[derive(Default)]
pub struct Args {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Args {
    pub(crate) fn insert(&mut self, label: &str, value: Box<dyn Any + Send + Sync>) {
        self.values.insert(label.to_owned(), value);
    }

    /// Returns the value bound to `label` if it was supplied and has type `T`.
    pub fn get<T: Any>(&self, label: &str) -> Option<&T> {
        self.values.get(label)?.downcast_ref::<T>()
    }

    /// Like [`get`](Args::get), but a missing or mistyped value is an error. Use this for required
    /// parameters, where absence means the action and its declaration disagree.
    pub fn require<T: Any>(&self, label: &str) -> anyhow::Result<&T> {
        self.get::<T>(label).ok_or_else(|| {
            anyhow::anyhow!(
                "parameter <{}> is not bound as {}",
                label,
                std::any::type_name::<T>()
            )
        })
    }

    /// Whether a value was bound to `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

/// Everything an action can see while it runs.
pub struct ExecContext<'a> {
    /// Who issued the command.
    pub sender: &'a dyn CommandSender,
    /// Values of this command's parameters.
    pub args: &'a Args,
    /// Services registered by the application.
    pub registry: &'a Registry,
    /// The name of the resolved command.
    pub command: &'a str,
}

/// One resolved command, produced by the parser. A single command line can resolve to several
/// invocations when subcommands are involved, outermost first.
#[derive(Debug)]
pub struct Invocation {
    name: String,
    args: Args,
    action: Action,
    registry: Arc<Registry>,
}

impl Invocation {
    /// Creates an invocation of the command called `name`.
    pub fn new(
        name: impl Into<String>,
        args: Args,
        action: Action,
        registry: Arc<Registry>,
    ) -> Self {
        Invocation {
            name: name.into(),
            args,
            action,
            registry,
        }
    }

    /// The canonical name of the resolved command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound parameter values.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// The executable handle.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Runs the action. Returns the produced value for value-producing actions, `None` otherwise.
    pub fn execute(&self, sender: &dyn CommandSender) -> Result<Option<Output>, Failure> {
        let context = ExecContext {
            sender,
            args: &self.args,
            registry: &self.registry,
            command: &self.name,
        };

        match &self.action {
            Action::None => Ok(None),
            Action::Run(run) => run(&context).map(|()| None),
            Action::Call(call) => call(&context).map(Some),
        }
    }
}
