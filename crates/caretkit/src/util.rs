#[allow(unused)]
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[allow(unused_macros)]
macro_rules! key_event {
    ($ch: literal) => {
        KeyEvent::new(KeyCode::Char($ch), match $ch.is_ascii_uppercase() {
            true => crossterm::event::KeyModifiers::SHIFT,
            false => crossterm::event::KeyModifiers::NONE,
        })
    };
    ($kc: expr) => {
        KeyEvent::new($kc, crossterm::event::KeyModifiers::NONE)
    };
    ($kc: literal, $km: expr) => {
        KeyEvent::new(KeyCode::Char($kc), $km)
    };
    ($kc: expr, $km: expr) => {
        KeyEvent::new($kc, $km)
    };
}

/// Number of characters in a string.
///
/// All node offsets in this crate are counted in characters, not bytes.
#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the character at `off`, or the string length when `off` is
/// past the final character.
pub(crate) fn byte_of_char(s: &str, off: usize) -> usize {
    s.char_indices().nth(off).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len() {
        assert_eq!(char_len(""), 0);
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("a\n\nb"), 4);
        assert_eq!(char_len("あい"), 2);
    }

    #[test]
    fn test_byte_of_char() {
        assert_eq!(byte_of_char("abc", 0), 0);
        assert_eq!(byte_of_char("abc", 2), 2);
        assert_eq!(byte_of_char("abc", 3), 3);
        assert_eq!(byte_of_char("abc", 10), 3);
        assert_eq!(byte_of_char("あい", 1), 3);
    }
}
