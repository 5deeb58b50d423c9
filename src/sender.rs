/// Whoever issued a command: a player in chat or the server console.
pub trait CommandSender: Send + Sync {
    /// Sends a line of chat text, already colour-translated, to this sender.
    fn send_message(&self, text: &str);

    /// A display name used in logs.
    fn name(&self) -> &str {
        "unknown"
    }
}
