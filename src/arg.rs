/// Splits raw command text into arguments on single space characters.
///
/// There is no quoting or escaping: two adjacent spaces produce an empty argument between them,
/// and a leading space produces an empty first argument. Trailing empty arguments are dropped, so
/// `"give "` and `"give"` tokenize identically.
pub fn tokenize(command: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = command.split(' ').collect();
    while matches!(tokens.last(), Some(token) if token.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Iterates over a tokenized command, tracking how many arguments have been consumed.
pub struct ArgumentTraverser<'cmd> {
    tokens: &'cmd [&'cmd str],
    index: usize,
}

impl<'cmd> ArgumentTraverser<'cmd> {
    /// Creates a traverser positioned before the first token.
    pub fn new(tokens: &'cmd [&'cmd str]) -> Self {
        ArgumentTraverser { tokens, index: 0 }
    }

    /// Returns the next argument without consuming it.
    pub fn peek(&self) -> Option<&'cmd str> {
        self.tokens.get(self.index).copied()
    }

    /// Returns the next argument, or `None` if no arguments remain.
    pub fn next(&mut self) -> Option<&'cmd str> {
        let token = self.peek()?;
        self.index += 1;
        Some(token)
    }
}

/// Trait for converting a single string argument into a concrete type. Any type which implements
/// this trait can be used as the type of a declared parameter.
///
/// The error is a human-readable reason; the parser attaches the parameter's label to it.
pub trait FromArgument: Sized + Send + Sync + 'static {
    /// Converts the given argument, failing only if no valid `Self` can be built from it. Logical
    /// checks belong in the command's action.
    fn from_arg(arg: &str) -> Result<Self, String>;
}

macro_rules! impl_from_arg_for_num {
    ($($num:ty),*) => {
        $(
            impl FromArgument for $num {
                fn from_arg(arg: &str) -> Result<Self, String> {
                    arg.parse::<$num>()
                        .map_err(|e| format!("\"{}\" is not a valid {}: {}", arg, stringify!($num), e))
                }
            }
        )*
    };
}

impl_from_arg_for_num!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize, f32, f64);

impl FromArgument for String {
    fn from_arg(arg: &str) -> Result<Self, String> {
        Ok(arg.to_owned())
    }
}

impl FromArgument for bool {
    fn from_arg(arg: &str) -> Result<Self, String> {
        match arg {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(format!(
                "\"{}\" is not a valid boolean, must be \"true\" or \"false\"",
                arg
            )),
        }
    }
}

impl FromArgument for char {
    fn from_arg(arg: &str) -> Result<Self, String> {
        let mut chars = arg.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            (None, _) => Err("Cannot parse an empty argument into a character".to_owned()),
            (Some(_), Some(_)) => Err(format!(
                "Cannot parse \"{}\" into a character, length is greater than one",
                arg
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_single_spaces() {
        assert_eq!(tokenize("give diamond 5"), vec!["give", "diamond", "5"]);
        assert_eq!(tokenize("say  hi"), vec!["say", "", "hi"]);
        assert_eq!(tokenize(" say"), vec!["", "say"]);
    }

    #[test]
    fn tokenize_drops_trailing_empty_tokens() {
        assert_eq!(tokenize("give  "), vec!["give"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn tokenize_ignores_quotes() {
        assert_eq!(tokenize("say \"a b\""), vec!["say", "\"a", "b\""]);
    }

    #[test]
    fn traverser_consumes_in_order() {
        let tokens = tokenize("tp 1 2");
        let mut args = ArgumentTraverser::new(&tokens);
        assert_eq!(args.peek(), Some("tp"));
        assert_eq!(args.next(), Some("tp"));
        assert_eq!(args.next(), Some("1"));
        assert_eq!(args.next(), Some("2"));
        assert_eq!(args.peek(), None);
        assert_eq!(args.next(), None);
    }

    #[test]
    fn conversions() {
        assert_eq!(u32::from_arg("64"), Ok(64));
        assert!(u32::from_arg("-1").is_err());
        assert_eq!(f64::from_arg("1.5"), Ok(1.5));
        assert_eq!(bool::from_arg("true"), Ok(true));
        assert!(bool::from_arg("yes").is_err());
        assert_eq!(char::from_arg("x"), Ok('x'));
        assert!(char::from_arg("xy").is_err());
        assert!(char::from_arg("").is_err());
        assert_eq!(String::from_arg(""), Ok(String::new()));
    }
}
