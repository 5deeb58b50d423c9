use parking_lot::Mutex;
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};
use tracing::{debug, error, trace};

use crate::{
    arg::tokenize,
    command::{CommandDefinition, CommandParser},
    config::{ConfigStore, DynamicValue},
    error::Failure,
    registry::Registry,
    sender::CommandSender,
    translate::{translate, Messages},
};

/// Resolves raw command text against a command definition, runs what it names and answers
/// failures.
///
/// The built parser is held between calls while caching is enabled. Caching is re-read from its
/// source on every dispatch; when it is off the parser is rebuilt each time.
pub struct Dispatcher<D: CommandDefinition> {
    definition: D,
    registry: Arc<Registry>,
    messages: Messages,
    cache_enabled: Box<dyn DynamicValue<bool>>,
    cache: Mutex<Option<Arc<D::Parser>>>,
}

impl<D: CommandDefinition> Dispatcher<D> {
    /// Creates a dispatcher whose templates and cache flag are read from `store`.
    pub fn new(definition: D, registry: Registry, store: &Arc<ConfigStore>) -> Self {
        Self::with_values(
            definition,
            Arc::new(registry),
            Messages::from_store(store),
            Box::new(store.value(|config| config.commands.enable_cache)),
        )
    }

    /// Creates a dispatcher from individual value sources.
    pub fn with_values(
        definition: D,
        registry: Arc<Registry>,
        messages: Messages,
        cache_enabled: Box<dyn DynamicValue<bool>>,
    ) -> Self {
        Dispatcher {
            definition,
            registry,
            messages,
            cache_enabled,
            cache: Mutex::new(None),
        }
    }

    /// The registry handed to the definition on every build.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Returns the held parser, building one first if caching is disabled or none is held.
    pub fn parser(&self, cache_enabled: bool) -> anyhow::Result<Arc<D::Parser>> {
        let mut cache = self.cache.lock();
        if cache_enabled {
            if let Some(parser) = cache.as_ref() {
                return Ok(Arc::clone(parser));
            }
        }

        let parser = Arc::new(self.definition.build(&self.registry)?);
        debug!(cache_enabled, "built command parser");
        *cache = Some(Arc::clone(&parser));
        Ok(parser)
    }

    /// Drops the held parser so that the next dispatch rebuilds it.
    pub fn invalidate(&self) {
        if self.cache.lock().take().is_some() {
            debug!("invalidated command parser");
        }
    }

    /// Whether a built parser is currently held.
    pub fn is_cached(&self) -> bool {
        self.cache.lock().is_some()
    }

    /// Dispatches `command_text` on behalf of `sender`.
    ///
    /// Returns `true` if the text was a recognized command, in which case it has been handled
    /// (executed, or answered with an error message) and should not be processed further.
    /// Returns `false` without side effects when nothing matched. Never panics on failures raised
    /// by parsing or by actions.
    ///
    /// A panicking action is answered like any other unexpected failure. The process panic hook
    /// is left to the host, so the default hook still prints the panic to stderr next to the
    /// logged record. Hosts wanting a single report install their own hook with
    /// [`std::panic::set_hook`].
    pub fn dispatch(&self, sender: &dyn CommandSender, command_text: &str) -> bool {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(sender, command_text)));
        let failure = match outcome {
            Ok(Ok(executed)) => return executed,
            Ok(Err(failure)) => failure,
            Err(payload) => Failure::Unexpected(anyhow::anyhow!(
                "command action panicked: {}",
                panic_message(&*payload)
            )),
        };

        self.respond(sender, command_text, failure)
    }

    fn run(&self, sender: &dyn CommandSender, command_text: &str) -> Result<bool, Failure> {
        let tokens = tokenize(command_text);
        let parser = self.parser(self.cache_enabled.get())?;
        let invocations = parser.parse(&tokens)?;

        for invocation in &invocations {
            if let Some(output) = invocation.execute(sender)? {
                output.emit(sender);
            }
        }

        Ok(!invocations.is_empty())
    }

    fn respond(&self, sender: &dyn CommandSender, command_text: &str, failure: Failure) -> bool {
        let translation = translate(&failure, &self.messages);
        if translation.unexpected {
            error!(
                command = command_text,
                sender = sender.name(),
                error = ?failure,
                "unexpected failure while running /{}",
                command_text
            );
        } else {
            trace!(command = command_text, %failure, "command failed");
        }

        if let Some(message) = &translation.message {
            sender.send_message(message);
        }

        translation.claimed
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}
