use crate::calculator::Action;

/// Characters that may enter the expression.
pub const ACCEPTED: &str = "0123456789+-*/().";

/// A key press, or a click on a button with a one-character label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
}

impl Action {
    /// Maps a key to its action; keys outside the keypad map to nothing.
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char('=') | Key::Enter => Some(Self::Evaluate),
            Key::Char('C' | 'c') => Some(Self::Clear),
            Key::Char(c) if ACCEPTED.contains(c) => Some(Self::Append(c)),
            Key::Char(_) => None,
        }
    }
}

/// Actions for one submitted line of input.
///
/// Submitting the line counts as pressing Enter, unless the line already
/// ends by evaluating or clearing.
#[must_use]
pub fn line_actions(line: &str) -> Vec<Action> {
    let mut actions: Vec<_> = line
        .chars()
        .map(Key::Char)
        .filter_map(Action::from_key)
        .collect();

    if !matches!(actions.last(), None | Some(Action::Evaluate | Action::Clear)) {
        actions.extend(Action::from_key(Key::Enter));
    }
    actions
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn keypad_keys() {
        assert_eq!(Action::from_key(Key::Char('7')), Some(Action::Append('7')));
        assert_eq!(Action::from_key(Key::Char('.')), Some(Action::Append('.')));
        assert_eq!(Action::from_key(Key::Char('(')), Some(Action::Append('(')));
        assert_eq!(Action::from_key(Key::Char('=')), Some(Action::Evaluate));
        assert_eq!(Action::from_key(Key::Enter), Some(Action::Evaluate));
        assert_eq!(Action::from_key(Key::Char('C')), Some(Action::Clear));
        assert_eq!(Action::from_key(Key::Char('c')), Some(Action::Clear));
    }

    #[test]
    fn foreign_keys_are_ignored() {
        for c in ['x', ' ', '%', '^', ',', '_'] {
            assert_eq!(Action::from_key(Key::Char(c)), None, "{c:?}");
        }
    }

    #[test]
    fn line_ends_with_enter() {
        assert_eq!(
            line_actions("2+x2"),
            vec![
                Action::Append('2'),
                Action::Append('+'),
                Action::Append('2'),
                Action::Evaluate,
            ]
        );
    }

    #[test]
    fn explicit_terminators_are_kept() {
        assert_eq!(
            line_actions("1="),
            vec![Action::Append('1'), Action::Evaluate]
        );
        assert_eq!(line_actions("9c"), vec![Action::Append('9'), Action::Clear]);
        assert_eq!(line_actions(""), vec![]);
        assert_eq!(line_actions("  "), vec![]);
    }
}
