//! ANSI colour helpers.
//!
//! Colours are embedded directly into strings (and so into the
//! interpreter's output buffer), which is why this is raw escape codes
//! rather than a stream-oriented colour writer.

/// Master switch for coloured output.
pub const USE_COLOURS: bool = true;

#[derive(Debug, Copy, Clone)]
pub enum Colour {
    Red,
    Purple,
}

impl Colour {
    fn code(self) -> &'static str {
        match self {
            Colour::Red => "\x1b[31m",
            Colour::Purple => "\x1b[35m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Wraps `text` in the colour's escape codes, or returns it unchanged when
/// colours are off.
pub fn paint(colour: Colour, text: &str) -> String {
    if USE_COLOURS {
        format!("{}{}{}", colour.code(), text, RESET)
    } else {
        text.to_owned()
    }
}
