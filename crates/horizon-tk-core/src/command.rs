//! Structured construction of interpreter scripts.
//!
//! A [`Command`] is an ordered list of tokens. Each token knows how it must
//! be quoted, so option values that contain whitespace or braces cannot
//! split into extra words or inject a nested command.
//!
//! # Example
//!
//! ```
//! use horizon_tk_core::Command;
//!
//! let cmd = Command::new("image")
//!     .word("create")
//!     .word("photo")
//!     .word("logo")
//!     .option("file", "/tmp/my logo.gif");
//! assert_eq!(cmd.to_script(), "image create photo logo -file {/tmp/my logo.gif}");
//! ```
//!
//! [`split_list`] performs the reverse direction for list-valued results
//! such as `bind <tag>` or `event info <virtual>`.

use std::fmt;

use crate::error::{InterpError, InterpResult};

/// A single token of a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// A plain word, quoted only when it needs to be.
    Word(String),
    /// Inserted verbatim. The caller guarantees it is a single valid word.
    Raw(String),
    /// `-key value`, with the value always in braced (or escaped) form.
    Option { key: String, value: String },
    /// A script body, braced so it is evaluated later rather than now.
    Script(String),
}

/// An interpreter command built from typed tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    tokens: Vec<Token>,
}

impl Command {
    /// Start a command with its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            tokens: vec![Token::Word(name.into())],
        }
    }

    /// Append a word argument.
    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.tokens.push(Token::Word(word.into()));
        self
    }

    /// Append several word arguments.
    pub fn words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens
            .extend(words.into_iter().map(|w| Token::Word(w.into())));
        self
    }

    /// Append a token verbatim, e.g. a command substitution like `[focus]`.
    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.tokens.push(Token::Raw(raw.into()));
        self
    }

    /// Append a `-key {value}` option pair.
    pub fn option(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.tokens.push(Token::Option {
            key: key.into(),
            value: value.to_string(),
        });
        self
    }

    /// Append a deferred script body.
    pub fn script(mut self, body: impl Into<String>) -> Self {
        self.tokens.push(Token::Script(body.into()));
        self
    }

    /// Number of tokens including the command name.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`: a command has at least its name.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Render the command as script text.
    pub fn to_script(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match token {
                Token::Word(w) => out.push_str(&quote_word(w)),
                Token::Raw(r) => out.push_str(r),
                Token::Option { key, value } => {
                    out.push('-');
                    out.push_str(&quote_word(key));
                    out.push(' ');
                    out.push_str(&brace_word(value));
                }
                Token::Script(body) => out.push_str(&brace_word(body)),
            }
        }
        out
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_script())
    }
}

fn is_special(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | '[' | ']' | '$' | '"' | ';' | '\\')
}

/// Quote a word only if it contains characters the interpreter would
/// otherwise act on.
pub fn quote_word(s: &str) -> String {
    if s.is_empty() {
        return "{}".to_string();
    }
    if !s.chars().any(is_special) {
        return s.to_string();
    }
    brace_word(s)
}

/// Quote a word in braced form when that preserves it exactly, falling back
/// to backslash escapes otherwise.
pub fn brace_word(s: &str) -> String {
    if can_brace(s) {
        format!("{{{s}}}")
    } else {
        escape_word(s)
    }
}

/// Braces are literal only when balanced, and a trailing odd backslash
/// would escape the closing brace.
fn can_brace(s: &str) -> bool {
    let mut depth = 0usize;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                None => return false,
                Some('\n') => return false,
                Some(_) => {}
            },
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth == 0
}

fn escape_word(s: &str) -> String {
    if s.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if is_special(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Split an interpreter list value into its elements.
///
/// Handles whitespace separation, braced elements (with nesting), quoted
/// elements and backslash escapes.
pub fn split_list(s: &str) -> InterpResult<Vec<String>> {
    let chars: Vec<char> = s.chars().collect();
    let mut items = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        let mut item = String::new();
        match chars[i] {
            '{' => {
                let mut depth = 1;
                i += 1;
                loop {
                    let Some(&c) = chars.get(i) else {
                        return Err(list_error(s, "unmatched open brace in list"));
                    };
                    match c {
                        '\\' if i + 1 < chars.len() => {
                            item.push(c);
                            item.push(chars[i + 1]);
                            i += 2;
                            continue;
                        }
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                i += 1;
                                break;
                            }
                        }
                        _ => {}
                    }
                    item.push(c);
                    i += 1;
                }
                if i < chars.len() && !chars[i].is_whitespace() {
                    return Err(list_error(
                        s,
                        "list element in braces followed by extra characters",
                    ));
                }
            }
            '"' => {
                i += 1;
                loop {
                    let Some(&c) = chars.get(i) else {
                        return Err(list_error(s, "unmatched open quote in list"));
                    };
                    match c {
                        '\\' => {
                            i = push_escape(&chars, i, &mut item);
                            continue;
                        }
                        '"' => {
                            i += 1;
                            break;
                        }
                        _ => item.push(c),
                    }
                    i += 1;
                }
                if i < chars.len() && !chars[i].is_whitespace() {
                    return Err(list_error(
                        s,
                        "list element in quotes followed by extra characters",
                    ));
                }
            }
            _ => {
                while i < chars.len() && !chars[i].is_whitespace() {
                    if chars[i] == '\\' {
                        i = push_escape(&chars, i, &mut item);
                    } else {
                        item.push(chars[i]);
                        i += 1;
                    }
                }
            }
        }
        items.push(item);
    }

    Ok(items)
}

/// Decode the backslash sequence starting at `i`, returning the next index.
fn push_escape(chars: &[char], i: usize, out: &mut String) -> usize {
    match chars.get(i + 1) {
        None => {
            out.push('\\');
            i + 1
        }
        Some('n') => {
            out.push('\n');
            i + 2
        }
        Some('t') => {
            out.push('\t');
            i + 2
        }
        Some('r') => {
            out.push('\r');
            i + 2
        }
        Some(&c) => {
            out.push(c);
            i + 2
        }
    }
}

fn list_error(list: &str, message: &str) -> InterpError {
    InterpError::new(list, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words_unquoted() {
        let cmd = Command::new("event").word("add").word("<<Paste>>").word("<Control-v>");
        assert_eq!(cmd.to_script(), "event add <<Paste>> <Control-v>");
        assert_eq!(cmd.len(), 4);
    }

    #[test]
    fn test_option_always_braced() {
        let cmd = Command::new("image")
            .word("create")
            .word("photo")
            .word("img1")
            .option("gamma", 1.5);
        assert_eq!(cmd.to_script(), "image create photo img1 -gamma {1.5}");
    }

    #[test]
    fn test_option_with_whitespace() {
        let cmd = Command::new("x").option("file", "a b.gif");
        assert_eq!(cmd.to_script(), "x -file {a b.gif}");
    }

    #[test]
    fn test_unbalanced_brace_escaped() {
        let cmd = Command::new("x").option("data", "a}b");
        assert_eq!(cmd.to_script(), "x -data a\\}b");
    }

    #[test]
    fn test_trailing_backslash_escaped() {
        assert_eq!(brace_word("dir\\"), "dir\\\\");
    }

    #[test]
    fn test_quote_word_cases() {
        assert_eq!(quote_word(""), "{}");
        assert_eq!(quote_word(".top.btn"), ".top.btn");
        assert_eq!(quote_word("two words"), "{two words}");
        assert_eq!(quote_word("[exit]"), "{[exit]}");
    }

    #[test]
    fn test_raw_and_script_tokens() {
        let cmd = Command::new("bind")
            .word(".b")
            .raw("<Button-1>")
            .script("cb1 %x %y");
        assert_eq!(cmd.to_script(), "bind .b <Button-1> {cb1 %x %y}");

        let clear = Command::new("bind").word(".b").raw("<Key>").script("");
        assert_eq!(clear.to_script(), "bind .b <Key> {}");
    }

    #[test]
    fn test_split_list_simple() {
        assert_eq!(
            split_list("<Control-v> <Shift-Insert>").unwrap(),
            vec!["<Control-v>", "<Shift-Insert>"]
        );
        assert!(split_list("").unwrap().is_empty());
        assert!(split_list("   \n ").unwrap().is_empty());
    }

    #[test]
    fn test_split_list_braces_and_quotes() {
        assert_eq!(
            split_list("a {b c} {d {e f}} \"g h\"").unwrap(),
            vec!["a", "b c", "d {e f}", "g h"]
        );
        assert_eq!(split_list("a\\ b c").unwrap(), vec!["a b", "c"]);
        assert_eq!(split_list("{}").unwrap(), vec![""]);
    }

    #[test]
    fn test_split_list_errors() {
        assert!(split_list("{abc").is_err());
        assert!(split_list("\"abc").is_err());
        assert!(split_list("{a}b").is_err());
    }

    #[test]
    fn test_quoting_survives_list_split() {
        for value in ["plain", "two words", "{nested {braces}}", "a}b", "tab\there", ""] {
            let rendered = Command::new("x").option("v", value).to_script();
            let parts = split_list(&rendered).unwrap();
            assert_eq!(parts, vec!["x".to_string(), "-v".to_string(), value.to_string()]);
        }
    }
}
