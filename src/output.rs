use crate::{color::translate_color_codes, sender::CommandSender};

/// The value returned by a value-producing action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Output {
    /// A single chat line. `&` colour codes are translated before sending.
    Text(String),
    /// Several values, emitted in order. Nesting is flattened.
    Many(Vec<Output>),
    /// Nothing to show.
    #[default]
    Silent,
}

impl Output {
    /// Sends this value to `sender`: text is colour-translated and sent, sequences are walked in
    /// order, and silent values send nothing.
    pub fn emit(&self, sender: &dyn CommandSender) {
        match self {
            Output::Text(text) => sender.send_message(&translate_color_codes(text)),
            Output::Many(values) => values.iter().for_each(|value| value.emit(sender)),
            Output::Silent => {}
        }
    }
}

impl From<()> for Output {
    fn from(_: ()) -> Self {
        Output::Silent
    }
}

impl From<String> for Output {
    fn from(text: String) -> Self {
        Output::Text(text)
    }
}

impl From<&str> for Output {
    fn from(text: &str) -> Self {
        Output::Text(text.to_owned())
    }
}

impl<T: Into<Output>> From<Vec<T>> for Output {
    fn from(values: Vec<T>) -> Self {
        Output::Many(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Output>> From<Option<T>> for Output {
    fn from(value: Option<T>) -> Self {
        value.map_or(Output::Silent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Inbox(Mutex<Vec<String>>);

    impl CommandSender for Inbox {
        fn send_message(&self, text: &str) {
            self.0.lock().push(text.to_owned());
        }
    }

    #[test]
    fn nested_sequences_flatten_in_order() {
        let inbox = Inbox::default();
        let output = Output::Many(vec![
            "a".into(),
            Output::from(vec!["b", "c"]),
        ]);
        output.emit(&inbox);
        assert_eq!(*inbox.0.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn silent_values_send_nothing() {
        let inbox = Inbox::default();
        Output::from(()).emit(&inbox);
        Output::from(None::<String>).emit(&inbox);
        Output::Many(vec![Output::Silent]).emit(&inbox);
        assert!(inbox.0.lock().is_empty());
    }

    #[test]
    fn text_is_colour_translated() {
        let inbox = Inbox::default();
        Output::from("&aok").emit(&inbox);
        assert_eq!(*inbox.0.lock(), vec!["\u{a7}aok"]);
    }
}
