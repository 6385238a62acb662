use crate::utils::Result;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static IDENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").unwrap());

/// Renames generated property identifiers to short names under a
/// reserved-word/pattern exclusion policy. The pattern targets
/// compiler-generated names that are globally unique in the bundle, so a
/// whole-identifier textual rewrite is sound. Occurrences inside string
/// literals are never touched, which keeps reflective lookups by quoted name
/// working.
pub struct PropertyMangler {
    pattern: Regex,
    reserved: HashSet<String>,
    cache: Mutex<NameCache>,
}

/// Stable original-name to short-name mapping, shared across every chunk of
/// a run so the same property renames identically everywhere.
#[derive(Default)]
struct NameCache {
    names: HashMap<String, String>,
    next: usize,
}

impl PropertyMangler {
    pub fn new(pattern: &str, reserved: &[String]) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            reserved: reserved.iter().cloned().collect(),
            cache: Mutex::new(NameCache::default()),
        })
    }

    pub fn rewrite(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let bytes = source.as_bytes();
        let mut code_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\'' | b'"' | b'`' => {
                    out.push_str(&self.rewrite_code(&source[code_start..i]));
                    let end = skip_string_literal(source, i);
                    out.push_str(&source[i..end]);
                    i = end;
                    code_start = i;
                }
                _ => i += 1,
            }
        }
        out.push_str(&self.rewrite_code(&source[code_start..]));
        out
    }

    fn rewrite_code(&self, code: &str) -> String {
        IDENT_REGEX
            .replace_all(code, |caps: &regex::Captures| {
                let ident = &caps[0];
                if self.reserved.contains(ident) || !self.pattern.is_match(ident) {
                    ident.to_string()
                } else {
                    self.rename(ident)
                }
            })
            .into_owned()
    }

    fn rename(&self, original: &str) -> String {
        let mut cache = self.cache.lock();
        if let Some(existing) = cache.names.get(original) {
            return existing.clone();
        }

        // Fresh names must survive a second pass unchanged: skip candidates
        // the pattern itself would select again.
        let fresh = loop {
            let candidate = format!("${}", short_name(cache.next));
            cache.next += 1;
            if !self.reserved.contains(&candidate) && !self.pattern.is_match(&candidate) {
                break candidate;
            }
        };

        cache.names.insert(original.to_string(), fresh.clone());
        fresh
    }
}

/// Past the closing quote of the literal starting at `start`, honoring
/// backslash escapes. Template literals are skipped wholesale, including
/// their interpolations.
fn skip_string_literal(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let quote = bytes[start];
    let mut i = start + 1;

    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i] == quote {
            return i + 1;
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Bijective base-26 sequence: a, b, .., z, aa, ab, ..
fn short_name(mut n: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::new();
    loop {
        out.push(ALPHABET[n % 26]);
        n /= 26;
        if n == 0 {
            break;
        }
        n -= 1;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
