use crate::error::{Result, TextractError};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Minimal reader for Steam's text VDF files (`libraryfolders.vdf`).
///
/// Keys and values are quoted strings, nesting uses `{ ... }`, `//` starts a
/// line comment. Nested keys are flattened to `Outer/Inner/Key`.
#[derive(Debug, Default, Clone)]
pub(crate) struct Vdf {
    pub(crate) kv: BTreeMap<String, String>,
}

impl Vdf {
    pub(crate) fn parse(text: &str) -> Result<Self> {
        let mut p = Parser::new(text);
        p.parse()?;
        Ok(Self { kv: p.out })
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&String> {
        self.kv.get(key)
    }

    /// Library roots listed in a `libraryfolders.vdf`.
    ///
    /// Understands both layouts Steam has shipped:
    /// - current: `"libraryfolders" { "0" { "path" "D:\\Steam" ... } }`
    /// - legacy: `"LibraryFolders" { "1" "D:\\Steam" }`
    pub(crate) fn library_paths(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        for (k, v) in &self.kv {
            let kl = k.to_ascii_lowercase();
            let mut parts = kl.split('/');
            if parts.next() != Some("libraryfolders") {
                continue;
            }
            let rest: Vec<&str> = parts.collect();
            let is_library = match rest.as_slice() {
                [_, "path"] => true,
                [index] => index.chars().all(|c| c.is_ascii_digit()),
                _ => false,
            };
            if is_library && !v.trim().is_empty() {
                out.push(PathBuf::from(v));
            }
        }
        out
    }
}

struct Parser<'a> {
    s: &'a [u8],
    i: usize,
    out: BTreeMap<String, String>,
    stack: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            s: text.as_bytes(),
            i: 0,
            out: BTreeMap::new(),
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<()> {
        let mut pending_key: Option<String> = None;

        while self.skip_ws_and_comments() {
            match self.peek() {
                Some(b'"') => {
                    let tok = self.read_quoted()?;
                    self.skip_ws_and_comments();
                    match self.peek() {
                        Some(b'"') => {
                            let val = self.read_quoted()?;
                            self.add_kv(&tok, val);
                        }
                        Some(b'{') => {
                            self.i += 1;
                            self.stack.push(tok);
                        }
                        _ => pending_key = Some(tok),
                    }
                }
                Some(b'{') => {
                    self.i += 1;
                    let key = pending_key.take().ok_or_else(|| TextractError::SteamConfig {
                        message: format!("block without a key at byte {}", self.i - 1),
                    })?;
                    self.stack.push(key);
                }
                Some(b'}') => {
                    if let Some(key) = pending_key.take() {
                        return Err(TextractError::SteamConfig {
                            message: format!("key \"{key}\" has no value at byte {}", self.i),
                        });
                    }
                    self.i += 1;
                    if self.stack.pop().is_none() {
                        return Err(TextractError::SteamConfig {
                            message: format!("unbalanced '}}' at byte {}", self.i - 1),
                        });
                    }
                }
                _ => self.i += 1,
            }
        }

        if !self.stack.is_empty() {
            return Err(TextractError::SteamConfig {
                message: "unclosed braces in VDF".into(),
            });
        }
        Ok(())
    }

    fn add_kv(&mut self, k: &str, v: String) {
        let mut path = String::new();
        for seg in &self.stack {
            path.push_str(seg);
            path.push('/');
        }
        path.push_str(k);
        self.out.insert(path, v);
    }

    fn skip_ws_and_comments(&mut self) -> bool {
        loop {
            while self.i < self.s.len() && self.s[self.i].is_ascii_whitespace() {
                self.i += 1;
            }
            if self.s[self.i..].starts_with(b"//") {
                while self.i < self.s.len() && self.s[self.i] != b'\n' {
                    self.i += 1;
                }
                continue;
            }
            return self.i < self.s.len();
        }
    }

    fn peek(&self) -> Option<u8> {
        self.s.get(self.i).copied()
    }

    fn read_quoted(&mut self) -> Result<String> {
        if self.peek() != Some(b'"') {
            return Err(TextractError::SteamConfig {
                message: "expected quoted string".into(),
            });
        }
        self.i += 1;
        let mut out = Vec::new();
        let mut escape = false;

        while self.i < self.s.len() {
            let c = self.s[self.i];
            self.i += 1;

            if escape {
                out.push(c);
                escape = false;
                continue;
            }
            match c {
                b'\\' => escape = true,
                b'"' => return Ok(String::from_utf8(out)?),
                _ => out.push(c),
            }
        }

        Err(TextractError::SteamConfig {
            message: "unterminated string in VDF".into(),
        })
    }
}
