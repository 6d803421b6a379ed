//! mIRC color codes for channel output.

const COLOR: char = '\x03';
const RESET: char = '\x0f';

fn paint(code: u8, text: &str) -> String {
    format!("{COLOR}{code:02}{text}{RESET}")
}

pub fn orange(text: &str) -> String {
    paint(7, text)
}

pub fn cyan(text: &str) -> String {
    paint(11, text)
}

/// Removes color and reset codes, e.g. for console output.
pub fn strip_colors(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            COLOR => {
                for _ in 0..2 {
                    if chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                        chars.next();
                    }
                }
            }
            RESET => {}
            _ => out.push(c),
        }
    }
    out
}
