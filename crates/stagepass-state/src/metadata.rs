//! Metadata resolution and recognized-attribute extraction.
//!
//! The indexer never fetches documents itself — a [`MetadataResolver`]
//! implementation (IPFS gateway, HTTP client, test fixture) hands back a
//! JSON document for a URI, or `None`. Extraction copies the recognized
//! attributes onto the entity and records the outcome in its parse status;
//! a failure degrades the status but never raises.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use stagepass_types::{Event, ParseStatus, Token};

/// The fetch seam. Implementations must not panic; unresolvable URIs are
/// `None`.
pub trait MetadataResolver {
    fn resolve(&self, uri: &str) -> Option<Value>;
}

/// Resolver that never finds anything. Every parse degrades to
/// [`ParseStatus::Failed`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl MetadataResolver for NullResolver {
    fn resolve(&self, _uri: &str) -> Option<Value> {
        None
    }
}

/// In-memory uri → document resolver for tests and replays.
#[derive(Debug, Default, Clone)]
pub struct FixtureResolver {
    docs: HashMap<String, Value>,
}

impl FixtureResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, uri: impl Into<String>, doc: Value) {
        self.docs.insert(uri.into(), doc);
    }
}

impl MetadataResolver for FixtureResolver {
    fn resolve(&self, uri: &str) -> Option<Value> {
        self.docs.get(uri).cloned()
    }
}

/// Which document attributes are recognized per entity kind. Anything not
/// listed is ignored even when present.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    pub event_attrs: Vec<&'static str>,
    pub token_attrs: Vec<&'static str>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            event_attrs: vec!["title", "description", "category", "image"],
            token_attrs: vec!["name", "description", "image"],
        }
    }
}

fn string_attr(doc: &Value, attr: &str) -> Option<String> {
    doc.get(attr).and_then(Value::as_str).map(str::to_string)
}

/// Extract recognized attributes onto an event container.
///
/// Returns `false` (and marks the container [`ParseStatus::Failed`]) when
/// the URI does not resolve to a JSON object; stored attributes are left
/// untouched in that case.
pub fn parse_event_metadata<R: MetadataResolver + ?Sized>(
    resolver: &R,
    cfg: &MetadataConfig,
    uri: &str,
    event: &mut Event,
) -> bool {
    let Some(doc) = resolver.resolve(uri).filter(Value::is_object) else {
        debug!(uri, key = %event.key, "event metadata did not resolve");
        event.parse_status = ParseStatus::Failed;
        return false;
    };
    for attr in &cfg.event_attrs {
        let Some(value) = string_attr(&doc, attr) else {
            continue;
        };
        match *attr {
            "title" => event.title = Some(value),
            "description" => event.description = Some(value),
            "category" => event.category = Some(value),
            "image" => event.image = Some(value),
            _ => {}
        }
    }
    event.parse_status = ParseStatus::Parsed;
    true
}

/// Extract recognized attributes onto a token. Same contract as
/// [`parse_event_metadata`].
pub fn parse_token_metadata<R: MetadataResolver + ?Sized>(
    resolver: &R,
    cfg: &MetadataConfig,
    uri: &str,
    token: &mut Token,
) -> bool {
    let Some(doc) = resolver.resolve(uri).filter(Value::is_object) else {
        debug!(uri, key = %token.key, "token metadata did not resolve");
        token.parse_status = ParseStatus::Failed;
        return false;
    };
    for attr in &cfg.token_attrs {
        let Some(value) = string_attr(&doc, attr) else {
            continue;
        };
        match *attr {
            "name" => token.name = Some(value),
            "description" => token.description = Some(value),
            "image" => token.image = Some(value),
            _ => {}
        }
    }
    token.parse_status = ParseStatus::Parsed;
    true
}
