//! Regex compilation cache for `$regex`
//!
//! Patterns are compiled once per process and shared between filters. The
//! cache is bounded; once full, new patterns are compiled but not retained.

use std::sync::RwLock;

use hashbrown::HashMap;
use regex::Regex;

const CACHE_CAPACITY: usize = 32;

/// Delimiters accepted around a pattern, as in `/^al/i`
const PATTERN_DELIMITERS: [char; 8] = ['/', '#', '~', '%', '@', '!', ';', ','];

pub struct RegexCache {
    cache: RwLock<HashMap<String, Regex>>,
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Get a compiled regex from the cache, compiling and caching it if absent
    ///
    /// # Errors
    ///
    /// Returns the `regex` crate's error for an invalid pattern.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        if let Ok(cache) = self.cache.read()
            && let Some(regex) = cache.get(pattern)
        {
            return Ok(regex.clone());
        }

        let regex = Regex::new(&translate_pattern(pattern))?;
        tracing::trace!(target: "datapath::filter", pattern, "regex compiled");

        if let Ok(mut cache) = self.cache.write()
            && cache.len() < CACHE_CAPACITY
        {
            cache.insert(pattern.to_string(), regex.clone());
        }

        Ok(regex)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

lazy_static::lazy_static! {
    pub static ref REGEX_CACHE: RegexCache = RegexCache::new();
}

/// Rewrite a delimited pattern (`/body/flags`) into inline-flag syntax
///
/// A pattern that does not start with a known delimiter, or whose trailing
/// characters after the closing delimiter are not all flags, is used as-is.
fn translate_pattern(pattern: &str) -> String {
    let mut chars = pattern.chars();
    let Some(open) = chars.next().filter(|c| PATTERN_DELIMITERS.contains(c)) else {
        return pattern.to_string();
    };

    let rest = &pattern[open.len_utf8()..];
    let Some(close) = rest.rfind(open) else {
        return pattern.to_string();
    };

    let body = &rest[..close];
    let modifiers = &rest[close + open.len_utf8()..];

    let mut inline = String::new();
    for modifier in modifiers.chars() {
        match modifier {
            'i' | 'm' | 's' | 'x' | 'U' => {
                if !inline.contains(modifier) {
                    inline.push(modifier);
                }
            }
            'u' => {}
            _ => return pattern.to_string(),
        }
    }

    if inline.is_empty() {
        body.to_string()
    } else {
        format!("(?{inline}){body}")
    }
}
