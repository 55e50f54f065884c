//! Content resources, requests, and an in-memory content tree.
//!
//! A [`Resource`] is an addressable node of a hierarchical content
//! structure. It is the location against which context-aware configuration
//! is resolved.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::value_map::ValueMap;

/// Property on a content resource pointing at its configuration bucket.
pub const CONFIG_REF_PROPERTY: &str = "sling:configRef";

/// Addressable node in a content hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    path: String,
    properties: ValueMap,
}

impl Resource {
    /// Creates a resource; the path is normalized to an absolute path
    /// without a trailing slash.
    pub fn new(path: impl AsRef<str>, properties: ValueMap) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            properties,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment, empty for the root.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }

    pub fn parent_path(&self) -> Option<&str> {
        parent_path(&self.path)
    }

    pub fn properties(&self) -> &ValueMap {
        &self.properties
    }

    /// Configuration reference carried by this resource, if any.
    pub fn config_ref(&self) -> Option<String> {
        self.properties
            .get::<String>(CONFIG_REF_PROPERTY)
            .filter(|r| !r.trim().is_empty())
    }
}

/// Returns the parent of an absolute path, `None` for the root.
///
/// ```rust
/// use ferrous_caconfig::resource::parent_path;
///
/// assert_eq!(parent_path("/content/region/site"), Some("/content/region"));
/// assert_eq!(parent_path("/content"), Some("/"));
/// assert_eq!(parent_path("/"), None);
/// ```
pub fn parent_path(path: &str) -> Option<&str> {
    if path == "/" || path.is_empty() {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some("/"),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}

pub(crate) fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Request-like adaptable wrapping the resource currently being rendered.
pub trait Request: Send + Sync {
    /// The request's own current resource.
    fn resource(&self) -> Option<&Resource>;
}

/// Plain request bound to one resource.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    resource: Option<Resource>,
}

impl ContentRequest {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource: Some(resource),
        }
    }

    /// A request without a current resource.
    pub fn detached() -> Self {
        Self { resource: None }
    }
}

impl Request for ContentRequest {
    fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }
}

/// In-memory content tree.
///
/// Cheap to clone; clones share the same nodes.
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::{ResourceTree, ValueMap};
///
/// let tree = ResourceTree::new();
/// tree.create("/content/region/site/en", ValueMap::new());
///
/// // intermediate nodes are created on the way
/// assert!(tree.get("/content/region").is_some());
/// let names: Vec<String> = tree
///     .ancestors("/content/region/site/en")
///     .iter()
///     .map(|r| r.path().to_string())
///     .collect();
/// assert_eq!(names, ["/content/region/site/en", "/content/region/site", "/content/region", "/content", "/"]);
/// ```
#[derive(Debug, Clone)]
pub struct ResourceTree {
    nodes: Arc<RwLock<BTreeMap<String, Resource>>>,
}

impl ResourceTree {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Resource::new("/", ValueMap::new()));
        Self {
            nodes: Arc::new(RwLock::new(nodes)),
        }
    }

    /// Creates (or replaces) a resource, creating missing ancestors empty.
    pub fn create(&self, path: impl AsRef<str>, properties: ValueMap) -> Resource {
        let resource = Resource::new(path, properties);
        let mut nodes = self.nodes.write();

        let mut current = resource.parent_path();
        while let Some(path) = current {
            if nodes.contains_key(path) {
                break;
            }
            nodes.insert(path.to_string(), Resource::new(path, ValueMap::new()));
            current = parent_path(path);
        }

        trace!(path = resource.path(), "resource created");
        nodes.insert(resource.path().to_string(), resource.clone());
        resource
    }

    pub fn get(&self, path: impl AsRef<str>) -> Option<Resource> {
        self.nodes.read().get(&normalize_path(path.as_ref())).cloned()
    }

    /// Existing resources from `path` up to the root, nearest first.
    pub fn ancestors(&self, path: impl AsRef<str>) -> Vec<Resource> {
        let nodes = self.nodes.read();
        let start = normalize_path(path.as_ref());
        let mut result = Vec::new();
        let mut current = Some(start.as_str());
        while let Some(path) = current {
            if let Some(resource) = nodes.get(path) {
                result.push(resource.clone());
            }
            current = parent_path(path);
        }
        result
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

impl Default for ResourceTree {
    fn default() -> Self {
        Self::new()
    }
}
