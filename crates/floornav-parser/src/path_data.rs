//! Tokenizer for path data strings.
//!
//! Splits the value of a path's `d` attribute into commands: a command
//! letter followed by its numeric arguments. The scan is deliberately
//! lenient. Argument tokens that do not parse as numbers are dropped, and
//! arguments written before the first command letter are discarded.

use std::fmt;

/// Path commands understood by the segment extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `M`: move the cursor without drawing.
    MoveTo,
    /// `L`: straight line to a point.
    LineTo,
    /// `H`: horizontal line to an x-coordinate.
    Horizontal,
    /// `V`: vertical line to a y-coordinate.
    Vertical,
    /// `Z`: line back to the start of the subpath.
    ClosePath,
    /// Any other letter; ignored by the extractor.
    Unsupported(char),
}

impl CommandKind {
    /// Classifies a command letter. Letters are case-sensitive, so relative
    /// (lowercase) commands are unsupported.
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'M' => Self::MoveTo,
            'L' => Self::LineTo,
            'H' => Self::Horizontal,
            'V' => Self::Vertical,
            'Z' => Self::ClosePath,
            other => Self::Unsupported(other),
        }
    }

    /// The command letter.
    pub fn letter(self) -> char {
        match self {
            Self::MoveTo => 'M',
            Self::LineTo => 'L',
            Self::Horizontal => 'H',
            Self::Vertical => 'V',
            Self::ClosePath => 'Z',
            Self::Unsupported(letter) => letter,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A command letter and its numeric arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    kind: CommandKind,
    args: Vec<f64>,
}

impl PathCommand {
    /// Creates a command.
    pub fn new(kind: CommandKind, args: Vec<f64>) -> Self {
        Self { kind, args }
    }

    /// Which command this is.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Numeric arguments, in source order.
    pub fn args(&self) -> &[f64] {
        &self.args
    }
}

/// Tokenizes a path data string.
///
/// An alphabetic character closes the open command and starts a new one.
/// Whitespace and commas end the current argument token; every other
/// character extends it. Tokens are parsed as `f64` when the command is
/// flushed and silently dropped when parsing fails.
pub fn tokenize(path_data: &str) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    let mut current: Option<(char, Vec<&str>)> = None;
    let mut token_start: Option<usize> = None;

    for (index, ch) in path_data.char_indices() {
        if ch.is_alphabetic() {
            close_token(path_data, &mut token_start, index, &mut current);
            if let Some((letter, tokens)) = current.take() {
                commands.push(finish_command(letter, &tokens));
            }
            current = Some((ch, Vec::new()));
        } else if ch.is_whitespace() || ch == ',' {
            close_token(path_data, &mut token_start, index, &mut current);
        } else if token_start.is_none() {
            token_start = Some(index);
        }
    }

    close_token(path_data, &mut token_start, path_data.len(), &mut current);
    if let Some((letter, tokens)) = current {
        commands.push(finish_command(letter, &tokens));
    }

    commands
}

fn close_token<'a>(
    source: &'a str,
    token_start: &mut Option<usize>,
    end: usize,
    current: &mut Option<(char, Vec<&'a str>)>,
) {
    let Some(start) = token_start.take() else {
        return;
    };
    if let Some((_, tokens)) = current {
        tokens.push(&source[start..end]);
    }
}

fn finish_command(letter: char, tokens: &[&str]) -> PathCommand {
    let args = tokens
        .iter()
        .filter_map(|token| token.parse::<f64>().ok())
        .collect();
    PathCommand::new(CommandKind::from_letter(letter), args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(commands: &[PathCommand]) -> Vec<char> {
        commands.iter().map(|c| c.kind().letter()).collect()
    }

    #[test]
    fn test_tokenize_basic_path() {
        let commands = tokenize("M 0 0 L 10 0 H 20 V 10 Z");

        assert_eq!(kinds(&commands), ['M', 'L', 'H', 'V', 'Z']);
        assert_eq!(commands[0].args(), [0.0, 0.0]);
        assert_eq!(commands[1].args(), [10.0, 0.0]);
        assert_eq!(commands[2].args(), [20.0]);
        assert_eq!(commands[3].args(), [10.0]);
        assert!(commands[4].args().is_empty());
    }

    #[test]
    fn test_tokenize_compact_form() {
        let commands = tokenize("M10.5,20L30 40.25H-5Z");

        assert_eq!(kinds(&commands), ['M', 'L', 'H', 'Z']);
        assert_eq!(commands[0].args(), [10.5, 20.0]);
        assert_eq!(commands[1].args(), [30.0, 40.25]);
        assert_eq!(commands[2].args(), [-5.0]);
    }

    #[test]
    fn test_tokenize_repeated_coordinates() {
        let commands = tokenize("L 1 2 3 4 5 6");

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].args(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_tokenize_drops_unparsable_tokens() {
        // "1-2" and "1.2.3" are single tokens that are not numbers.
        let commands = tokenize("L 1-2 5 1.2.3 7");

        assert_eq!(commands[0].args(), [5.0, 7.0]);
    }

    #[test]
    fn test_tokenize_separators_collapse() {
        let commands = tokenize("M  3 ,, 4\t\nL5 6");

        assert_eq!(commands[0].args(), [3.0, 4.0]);
        assert_eq!(commands[1].args(), [5.0, 6.0]);
    }

    #[test]
    fn test_tokenize_drops_leading_arguments() {
        let commands = tokenize("1 2 M 3 4");

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].args(), [3.0, 4.0]);
    }

    #[test]
    fn test_tokenize_marks_unsupported_commands() {
        let commands = tokenize("M 0 0 C 1 1 2 2 3 3 l 4 4");

        assert_eq!(commands[1].kind(), CommandKind::Unsupported('C'));
        assert_eq!(commands[2].kind(), CommandKind::Unsupported('l'));
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
