//! Request parser
//!
//! Two rules, tried in order:
//!
//! 1. `SET <key> <value>`: the verb, a whitespace-free key, then the rest
//!    of the line. Whitespace after the verb is optional and any run of
//!    whitespace (newlines included) is skipped before the key and before
//!    the value. The value stops at the first `\n`.
//! 2. `GET <key>`: the verb and a whitespace-free key. Anything after the
//!    key is ignored.
//!
//! A request that starts with the `SET` verb but does not complete rule 1
//! falls back to a GET of its first whitespace-delimited token, so
//! `SET onlykey` reads as `GET SET`.

use super::{Command, CommandType};

/// Trim a raw request to what the parser sees: at most `max_len` bytes,
/// ending before the first NUL.
pub fn normalize(request: &[u8], max_len: usize) -> &[u8] {
    let request = &request[..request.len().min(max_len)];
    match request.iter().position(|&b| b == 0) {
        Some(nul) => &request[..nul],
        None => request,
    }
}

/// Parse one request buffer
///
/// Returns `None` when neither rule matches.
pub fn parse_command(request: &[u8]) -> Option<Command> {
    match parse_set(request) {
        SetMatch::Command(command) => Some(command),
        SetMatch::Verb => first_token(request).map(|key| Command::Get { key: key.to_vec() }),
        SetMatch::None => parse_get(request),
    }
}

/// How far rule 1 got
enum SetMatch {
    /// Full match
    Command(Command),

    /// Only the `SET` verb matched
    Verb,

    /// Not a SET line at all
    None,
}

fn parse_set(request: &[u8]) -> SetMatch {
    let mut scanner = Scanner::new(request);
    if !scanner.verb(CommandType::Set) {
        return SetMatch::None;
    }

    let Some(key) = scanner.token() else {
        return SetMatch::Verb;
    };
    scanner.skip_space();
    let Some(value) = scanner.line() else {
        return SetMatch::Verb;
    };

    SetMatch::Command(Command::Set {
        key: key.to_vec(),
        value: value.to_vec(),
    })
}

fn parse_get(request: &[u8]) -> Option<Command> {
    let mut scanner = Scanner::new(request);
    if !scanner.verb(CommandType::Get) {
        return None;
    }
    scanner.token().map(|key| Command::Get { key: key.to_vec() })
}

fn first_token(request: &[u8]) -> Option<&[u8]> {
    Scanner::new(request).token()
}

/// Whitespace as the C locale defines it
pub(crate) fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Forward-only cursor over a request
struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Consume the verb literal, case-sensitive
    fn verb(&mut self, command_type: CommandType) -> bool {
        let verb = command_type.verb();
        if self.rest().starts_with(verb) {
            self.pos += verb.len();
            true
        } else {
            false
        }
    }

    fn skip_space(&mut self) {
        let skipped = self.rest().iter().take_while(|&&b| is_space(b)).count();
        self.pos += skipped;
    }

    /// Skip leading whitespace, then take a non-empty run of non-whitespace
    fn token(&mut self) -> Option<&'a [u8]> {
        self.skip_space();
        self.take_while(|b| !is_space(b))
    }

    /// Take a non-empty run up to the next newline
    fn line(&mut self) -> Option<&'a [u8]> {
        self.take_while(|b| b != b'\n')
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> Option<&'a [u8]> {
        let rest = self.rest();
        let len = rest.iter().take_while(|&&b| pred(b)).count();
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }
}
