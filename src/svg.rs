// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading and writing path data.
//!
//! Only the absolute `M`, `L`, `C` and `Z`/`z` commands are supported.

use std::fmt;
use std::str::FromStr;

use crate::log::trace;
use crate::{Error, Path, Result, Segment};

impl Path {
    /// Parse path data, such as `"M 0 0 L 10 0 C 10 5 5 10 0 10 Z"`.
    ///
    /// Numbers may be separated by whitespace, commas, or nothing at all
    /// where the next number starts with a sign or a second decimal point
    /// (`"L1.6.8"`, `"M100-200"`). A command followed by several segments'
    /// worth of coordinates repeats, with extra pairs after `M` read as
    /// `L`. Empty data is an empty path.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCommand`] for an unsupported command letter,
    /// [`Error::InvalidArity`] for a wrong coordinate count,
    /// [`Error::MissingCommand`] for numbers before the first command,
    /// [`Error::InvalidNumber`] for a malformed number and
    /// [`Error::UnexpectedCharacter`] for anything else.
    pub fn parse(data: &str) -> Result<Path> {
        let mut lexer = PathLexer::new(data);
        let mut path = Path::new();
        let mut command = None;
        let mut coords = Vec::new();
        while let Some(token) = lexer.next_token()? {
            match token {
                Token::Command(c) => {
                    flush(&mut path, command, &coords)?;
                    command = Some(c);
                    coords.clear();
                }
                Token::Number(n) => {
                    if command.is_none() {
                        return Err(Error::MissingCommand(lexer.token_start));
                    }
                    coords.push(n);
                }
            }
        }
        flush(&mut path, command, &coords)?;
        Ok(path)
    }

    /// Whether `data` uses only characters [`Path::parse`] can read in the
    /// common case: digits, whitespace, `,`, `.` and the supported command
    /// letters.
    ///
    /// Signs and exponents are parsed but not counted here.
    pub fn is_data_supported(data: &str) -> bool {
        data.chars().all(|c| {
            c.is_ascii_digit() || c.is_whitespace() || matches!(c, ',' | '.' | 'M' | 'L' | 'C' | 'Z' | 'z')
        })
    }

    /// The path data, segment tokens separated by spaces.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPath`] if the path is not empty and does not start
    /// with a `MoveTo`. [`Display`](fmt::Display) writes such paths anyway.
    pub fn serialize(&self) -> Result<String> {
        if !self.is_valid() {
            return Err(Error::InvalidPath);
        }
        Ok(self.to_string())
    }
}

fn flush(path: &mut Path, command: Option<char>, coords: &[f64]) -> Result<()> {
    if let Some(command) = command {
        trace!(%command, coords = coords.len(), "path command");
        path.append_segments(Segment::from_coords(command, coords)?);
    }
    Ok(())
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

enum Token {
    Command(char),
    Number(f64),
}

struct PathLexer<'a> {
    data: &'a str,
    ix: usize,
    token_start: usize,
}

impl<'a> PathLexer<'a> {
    fn new(data: &'a str) -> PathLexer<'a> {
        PathLexer {
            data,
            ix: 0,
            token_start: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if !(c.is_ascii_whitespace() || c == b',') {
                break;
            }
            self.ix += 1;
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.ix;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.ix += 1;
        }
        self.ix - start
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_separators();
        self.token_start = self.ix;
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        match c {
            b'M' | b'L' | b'C' | b'Z' | b'z' => {
                self.ix += 1;
                Ok(Some(Token::Command(c as char)))
            }
            c if c.is_ascii_alphabetic() => Err(Error::UnknownCommand(c as char)),
            b'0'..=b'9' | b'+' | b'-' | b'.' => self.get_number().map(|n| Some(Token::Number(n))),
            _ => {
                let ch = self.data[self.ix..].chars().next().unwrap_or_default();
                Err(Error::UnexpectedCharacter {
                    ch,
                    offset: self.ix,
                })
            }
        }
    }

    fn get_number(&mut self) -> Result<f64> {
        let start = self.ix;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.ix += 1;
        }
        let mut digit_count = self.skip_digits();
        if self.peek() == Some(b'.') {
            self.ix += 1;
            digit_count += self.skip_digits();
        }
        if digit_count > 0 && matches!(self.peek(), Some(b'e' | b'E')) {
            // Only an exponent if digits follow.
            let mark = self.ix;
            self.ix += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.ix += 1;
            }
            if self.skip_digits() == 0 {
                self.ix = mark;
            }
        }
        let text = &self.data[start..self.ix];
        if digit_count == 0 {
            return Err(Error::InvalidNumber(text.to_string()));
        }
        text.parse()
            .map_err(|_| Error::InvalidNumber(text.to_string()))
    }
}
