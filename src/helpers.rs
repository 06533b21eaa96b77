use std::sync::OnceLock;

use regex::Regex;
use crate::error::{format_ensure, Result};

#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum LineBreak {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineBreak {
    pub fn as_str(self) -> &'static str {
        match self {
            LineBreak::Lf => "\n",
            LineBreak::CrLf => "\r\n",
            LineBreak::Cr => "\r",
        }
    }

    pub fn from_str_exact(s: &str) -> Option<Self> {
        match s {
            "\n" => Some(LineBreak::Lf),
            "\r\n" => Some(LineBreak::CrLf),
            "\r" => Some(LineBreak::Cr),
            _ => None,
        }
    }

    pub fn repeat(self, n: usize) -> String {
        self.as_str().repeat(n)
    }
}

pub fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn line_break_regex() -> &'static Regex {
    static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
    LINE_BREAK.get_or_init(|| Regex::new(r"\r\n|\n|\r").expect("invalid line break pattern"))
}

pub fn split_lines(s: &str) -> Vec<&str> {
    line_break_regex().split(s).collect()
}

pub fn split_every(s: &str, width: usize) -> Vec<&str> {
    assert!(width > 0);
    let mut out = vec![];
    let mut rest = s;
    while !rest.is_empty() {
        let n = width.min(rest.len());
        let (head, tail) = rest.split_at(n);
        out.push(head);
        rest = tail;
    }
    out
}

/// Slice `s` into exactly `count` segments of `width` bytes, with no remainder.
/// The input must be ASCII (callers validate the grammar first).
pub fn split_exact<'a>(s: &'a str, width: usize, count: usize, what: &str) -> Result<Vec<&'a str>> {
    format_ensure!(
        s.is_ascii() && s.len() == width * count,
        "{} must be {} characters ({} x {}), got {}",
        what,
        width * count,
        count,
        width,
        s.len()
    );
    Ok(split_every(s, width))
}
