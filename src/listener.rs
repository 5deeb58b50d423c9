use std::sync::Arc;

use crate::{command::CommandDefinition, dispatcher::Dispatcher, sender::CommandSender};

/// An event whose further processing can be suppressed.
pub trait Cancellable {
    /// Whether an earlier handler already claimed the event.
    fn is_cancelled(&self) -> bool;

    /// Claims or releases the event.
    fn set_cancelled(&mut self, cancelled: bool);
}

/// A player typed a command in chat. The message still carries its leading `/`.
pub struct PlayerCommandEvent {
    /// The player who sent the command.
    pub player: Arc<dyn CommandSender>,
    /// The raw chat message.
    pub message: String,
    cancelled: bool,
}

impl PlayerCommandEvent {
    /// Creates an uncancelled event.
    pub fn new(player: Arc<dyn CommandSender>, message: impl Into<String>) -> Self {
        PlayerCommandEvent {
            player,
            message: message.into(),
            cancelled: false,
        }
    }
}

impl Cancellable for PlayerCommandEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A command was entered on the server console, or by another non-player sender.
pub struct ServerCommandEvent {
    /// Who sent the command.
    pub sender: Arc<dyn CommandSender>,
    /// The command text, without a leading `/`.
    pub command: String,
    cancelled: bool,
}

impl ServerCommandEvent {
    /// Creates an uncancelled event.
    pub fn new(sender: Arc<dyn CommandSender>, command: impl Into<String>) -> Self {
        ServerCommandEvent {
            sender,
            command: command.into(),
            cancelled: false,
        }
    }
}

impl Cancellable for ServerCommandEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Hooks a [`Dispatcher`] into the host's command events. Events that resolve to a declared
/// command are cancelled so no other handler sees them; everything else passes through untouched.
pub struct CommandInterceptor<D: CommandDefinition> {
    dispatcher: Dispatcher<D>,
}

impl<D: CommandDefinition> CommandInterceptor<D> {
    /// Wraps a dispatcher.
    pub fn new(dispatcher: Dispatcher<D>) -> Self {
        CommandInterceptor { dispatcher }
    }

    /// The wrapped dispatcher, e.g. to invalidate its parser.
    pub fn dispatcher(&self) -> &Dispatcher<D> {
        &self.dispatcher
    }

    /// Handles a chat command.
    pub fn on_player_command(&self, event: &mut PlayerCommandEvent) {
        if event.is_cancelled() {
            return;
        }

        let text = event.message.strip_prefix('/').unwrap_or(&event.message);
        let executed = self.dispatcher.dispatch(event.player.as_ref(), text);
        event.set_cancelled(executed);
    }

    /// Handles a console command.
    pub fn on_server_command(&self, event: &mut ServerCommandEvent) {
        if event.is_cancelled() {
            return;
        }

        let executed = self.dispatcher.dispatch(event.sender.as_ref(), &event.command);
        event.set_cancelled(executed);
    }
}
