//! Method and path-pattern routing.

use std::collections::HashMap;

use regex::Regex;

use crate::parser::Method;
use crate::server::error::Error;
use crate::server::handler::HandlerFn;

/// One registered (pattern, handler) pair.
pub struct RouteEntry {
    /// The pattern text as registered.
    pub pattern: String,
    regex: Regex,
    handler: HandlerFn,
}

/// The routing table: method → ordered pattern/handler entries.
///
/// Mutated only through [`Router::add_handler`] before the accept loop
/// starts; after that it is shared behind a read lock and only looked up.
#[derive(Default)]
pub struct Router {
    table: HashMap<Method, Vec<RouteEntry>>,
}

impl Router {
    /// Create an empty routing table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `(method, pattern)`.
    ///
    /// The pattern is compiled as an anchored regular expression and must
    /// match the full request path, so literal paths like `/index.html`
    /// work unchanged alongside parameterized patterns like `/items/\d+`.
    ///
    /// Re-registering an identical `(method, pattern)` pair replaces the
    /// handler in place: the last registration wins, and the entry keeps
    /// its original position in the scan order.
    pub fn add_handler(
        &mut self,
        method: Method,
        pattern: &str,
        handler: HandlerFn,
    ) -> Result<(), Error> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})\z"))?;

        let entries = self.table.entry(method).or_default();
        match entries.iter_mut().find(|entry| entry.pattern == pattern) {
            Some(entry) => entry.handler = handler,
            None => entries.push(RouteEntry {
                pattern: pattern.to_string(),
                regex,
                handler,
            }),
        }

        Ok(())
    }

    /// Select the handler for `(method, path)`.
    ///
    /// Entries are scanned in registration order and the first full match
    /// wins, which makes the tie-break deterministic when several
    /// registered patterns match the same path. `None` means no entry
    /// matched and the caller must answer with a 404.
    pub fn route(&self, method: Method, path: &str) -> Option<HandlerFn> {
        self.table
            .get(&method)?
            .iter()
            .find(|entry| entry.regex.is_match(path))
            .map(|entry| entry.handler.clone())
    }

    /// All registered (method, pattern) pairs, for startup logging.
    pub fn routes(&self) -> impl Iterator<Item = (Method, &str)> {
        self.table
            .iter()
            .flat_map(|(method, entries)| {
                entries.iter().map(move |entry| (*method, entry.pattern.as_str()))
            })
    }
}
