//! XML namespace handling
//!
//! This module provides qualified names and the prefix to namespace binding
//! snapshots consumed when resolving `xs:QName` and `xs:NOTATION` values.

use crate::XML_NAMESPACE;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// One binding layered over its parent frame
#[derive(Debug)]
struct Frame {
    /// `None` binds the default namespace
    prefix: Option<Prefix>,
    /// Empty string undeclares the prefix or default namespace
    namespace: NamespaceUri,
    parent: Option<Arc<Frame>>,
}

impl Drop for Frame {
    // Unlink uniquely owned ancestors one at a time so a long chain does not
    // recurse once per frame.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(frame) = next {
            next = match Arc::try_unwrap(frame) {
                Ok(mut owned) => owned.parent.take(),
                Err(_) => None,
            };
        }
    }
}

/// Immutable prefix to namespace mapping
///
/// [`bind`](Self::bind) never modifies a snapshot: it returns a new one that
/// shares every earlier frame with its parent, so cloning and binding are cheap
/// and snapshots can be handed to any number of threads.
#[derive(Debug, Clone, Default)]
pub struct NamespaceBindings {
    head: Option<Arc<Frame>>,
}

impl NamespaceBindings {
    /// Create an empty snapshot (only the `xml` prefix is bound)
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new snapshot with `prefix` bound to `namespace`
    pub fn bind(&self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.push(Some(prefix.into()), namespace.into())
    }

    /// Return a new snapshot with the default namespace set to `namespace`.
    /// An empty string undeclares the default namespace.
    pub fn bind_default(&self, namespace: impl Into<String>) -> Self {
        self.push(None, namespace.into())
    }

    fn push(&self, prefix: Option<Prefix>, namespace: NamespaceUri) -> Self {
        Self {
            head: Some(Arc::new(Frame {
                prefix,
                namespace,
                parent: self.head.clone(),
            })),
        }
    }

    fn lookup(&self, prefix: Option<&str>) -> Option<&str> {
        let mut frame = self.head.as_deref();
        while let Some(current) = frame {
            if current.prefix.as_deref() == prefix {
                return if current.namespace.is_empty() {
                    None
                } else {
                    Some(current.namespace.as_str())
                };
            }
            frame = current.parent.as_deref();
        }
        None
    }

    /// Get the namespace bound to a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.lookup(Some(prefix))
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.lookup(None)
    }

    /// Number of frames in this snapshot, including shadowed ones
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.head.as_deref();
        while let Some(current) = frame {
            depth += 1;
            frame = current.parent.as_deref();
        }
        depth
    }

    /// Whether `other` is a later snapshot derived from this one (or the same)
    pub fn is_ancestor_of(&self, other: &NamespaceBindings) -> bool {
        let Some(ref mine) = self.head else {
            return true;
        };
        let mut frame = other.head.as_ref();
        while let Some(current) = frame {
            if Arc::ptr_eq(current, mine) {
                return true;
            }
            frame = current.parent.as_ref();
        }
        false
    }
}
