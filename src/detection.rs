//! Pluggable detection of the resource used for configuration lookup.
//!
//! Hosting applications can redirect configuration lookups for a request
//! to a different resource than the one being rendered, e.g. for synthetic
//! or aggregated pages.

use std::sync::Arc;

use tracing::debug;

use crate::registry::ServiceRegistry;
use crate::resource::{Request, Resource};
use crate::traits::Resolver;

/// Suggests an alternate resource for a request.
pub trait ConfigurationInjectResourceDetectionStrategy: Send + Sync {
    /// Returns the resource to use instead of the request's own, if any.
    fn detect_resource(&self, request: &dyn Request) -> Option<Resource>;
}

/// Combines all detection strategies into one answer.
pub trait ResourceDetectionStrategyMultiplexer: Send + Sync {
    fn detect_resource(&self, request: &dyn Request) -> Option<Resource>;
}

/// Asks each strategy in order and returns the first answer.
pub fn detect_first<'a, I>(strategies: I, request: &dyn Request) -> Option<Resource>
where
    I: IntoIterator<Item = &'a Arc<dyn ConfigurationInjectResourceDetectionStrategy>>,
{
    strategies
        .into_iter()
        .find_map(|strategy| strategy.detect_resource(request))
}

/// Multiplexer over the strategies published in a [`ServiceRegistry`].
///
/// Strategies are looked up on every call, highest service ranking first,
/// so strategies registered later take effect immediately.
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::{
///     ConfigurationInjectResourceDetectionStrategy, ContentRequest, RankedStrategyMultiplexer,
///     Request, Resource, ResourceDetectionStrategyMultiplexer, ServiceRegistry, ValueMap,
/// };
/// use std::sync::Arc;
///
/// struct Redirect;
/// impl ConfigurationInjectResourceDetectionStrategy for Redirect {
///     fn detect_resource(&self, _request: &dyn Request) -> Option<Resource> {
///         Some(Resource::new("/content/site/en", ValueMap::new()))
///     }
/// }
///
/// let registry = ServiceRegistry::new();
/// let multiplexer = RankedStrategyMultiplexer::new(registry.clone());
/// let request = ContentRequest::new(Resource::new("/content/other", ValueMap::new()));
/// assert!(multiplexer.detect_resource(&request).is_none());
///
/// registry.register_trait::<dyn ConfigurationInjectResourceDetectionStrategy>(Arc::new(Redirect), 100);
/// let detected = multiplexer.detect_resource(&request).unwrap();
/// assert_eq!(detected.path(), "/content/site/en");
/// ```
#[derive(Clone)]
pub struct RankedStrategyMultiplexer {
    registry: ServiceRegistry,
}

impl RankedStrategyMultiplexer {
    pub fn new(registry: ServiceRegistry) -> Self {
        Self { registry }
    }
}

impl ResourceDetectionStrategyMultiplexer for RankedStrategyMultiplexer {
    fn detect_resource(&self, request: &dyn Request) -> Option<Resource> {
        let strategies = self
            .registry
            .get_all_trait::<dyn ConfigurationInjectResourceDetectionStrategy>()
            .unwrap_or_default();
        let detected = detect_first(&strategies, request);
        if let Some(resource) = &detected {
            debug!(
                strategies = strategies.len(),
                detected = resource.path(),
                "detection strategy redirected request"
            );
        }
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ContentRequest;
    use crate::value_map::ValueMap;

    struct Fixed(Option<&'static str>);

    impl ConfigurationInjectResourceDetectionStrategy for Fixed {
        fn detect_resource(&self, _request: &dyn Request) -> Option<Resource> {
            self.0.map(|path| Resource::new(path, ValueMap::new()))
        }
    }

    #[test]
    fn test_first_answer_wins() {
        let strategies: Vec<Arc<dyn ConfigurationInjectResourceDetectionStrategy>> = vec![
            Arc::new(Fixed(None)),
            Arc::new(Fixed(Some("/a"))),
            Arc::new(Fixed(Some("/b"))),
        ];
        let request = ContentRequest::detached();
        assert_eq!(detect_first(&strategies, &request).unwrap().path(), "/a");
    }

    #[test]
    fn test_no_strategies() {
        let strategies: Vec<Arc<dyn ConfigurationInjectResourceDetectionStrategy>> = Vec::new();
        assert!(detect_first(&strategies, &ContentRequest::detached()).is_none());
    }
}
