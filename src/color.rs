use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt::{self, Display, Formatter};

/// The character which introduces a formatting code in chat text.
pub const COLOR_CHAR: char = '\u{a7}';

/// Chat formatting codes understood by the client.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl ChatColor {
    /// The character following [`COLOR_CHAR`] for this code.
    pub fn code(self) -> char {
        match self {
            ChatColor::Black => '0',
            ChatColor::DarkBlue => '1',
            ChatColor::DarkGreen => '2',
            ChatColor::DarkAqua => '3',
            ChatColor::DarkRed => '4',
            ChatColor::DarkPurple => '5',
            ChatColor::Gold => '6',
            ChatColor::Gray => '7',
            ChatColor::DarkGray => '8',
            ChatColor::Blue => '9',
            ChatColor::Green => 'a',
            ChatColor::Aqua => 'b',
            ChatColor::Red => 'c',
            ChatColor::LightPurple => 'd',
            ChatColor::Yellow => 'e',
            ChatColor::White => 'f',
            ChatColor::Obfuscated => 'k',
            ChatColor::Bold => 'l',
            ChatColor::Strikethrough => 'm',
            ChatColor::Underline => 'n',
            ChatColor::Italic => 'o',
            ChatColor::Reset => 'r',
        }
    }
}

impl Display for ChatColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", COLOR_CHAR, self.code())
    }
}

/// Replaces every `&` followed by a formatting code character with the chat escape for that code.
/// Code characters are matched case-insensitively and always emitted in lower case; an `&` before
/// any other character is left untouched.
pub fn translate_color_codes(text: &str) -> String {
    lazy_static! {
        static ref CODE: Regex = Regex::new("&([0-9A-FK-ORXa-fk-orx])").unwrap();
    }

    CODE.replace_all(text, |caps: &Captures<'_>| {
        format!("{}{}", COLOR_CHAR, caps[1].to_ascii_lowercase())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_codes() {
        assert_eq!(translate_color_codes("&cHello"), "\u{a7}cHello");
        assert_eq!(translate_color_codes("&Ab&lc"), "\u{a7}ab\u{a7}lc");
    }

    #[test]
    fn leaves_other_ampersands() {
        assert_eq!(translate_color_codes("salt & pepper"), "salt & pepper");
        assert_eq!(translate_color_codes("&z&"), "&z&");
        assert_eq!(translate_color_codes("&&c"), "&\u{a7}c");
    }

    #[test]
    fn display_matches_translation() {
        assert_eq!(ChatColor::Red.to_string(), translate_color_codes("&c"));
        assert_eq!(ChatColor::Reset.to_string(), "\u{a7}r");
    }
}
