//! Entry point tying an engine to a configuration

use crate::config::Config;
use crate::engine::{Engine, LittleCms};
use crate::handle::{ManagedResource, NativeHandle, ResourceKind};
use crate::Result;
use std::fmt;
use std::sync::Arc;

/// Binding session over one engine
///
/// Profile, transform and pixel operations live in the `profile`,
/// `transform` and `pixel` modules as further `impl Cms` blocks.
#[derive(Clone)]
pub struct Cms {
    engine: Arc<dyn Engine>,
    config: Config,
}

impl Cms {
    /// Little CMS with the default configuration
    pub fn new() -> Self {
        Self {
            engine: Arc::new(LittleCms),
            config: Config::default(),
        }
    }

    /// Any engine with a validated configuration
    pub fn with_engine(engine: Arc<dyn Engine>, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { engine, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &Arc<dyn Engine> {
        &self.engine
    }

    /// Encoded version of the linked engine, e.g. `2160`
    pub fn engine_version(&self) -> i32 {
        self.engine.version()
    }

    pub fn version(&self) -> Version {
        Version::from_encoded(self.engine_version())
    }

    pub(crate) fn wrap(
        &self,
        raw: Option<NativeHandle>,
        kind: ResourceKind,
        operation: &'static str,
    ) -> Result<ManagedResource> {
        ManagedResource::wrap(self.engine.clone(), raw, kind, operation)
    }

    pub(crate) fn handle_of(
        &self,
        resource: &ManagedResource,
        kind: ResourceKind,
    ) -> Result<NativeHandle> {
        resource.unwrap_for(&self.engine, kind)
    }
}

impl Default for Cms {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cms")
            .field("engine_version", &self.engine_version())
            .field("config", &self.config)
            .finish()
    }
}

/// Engine version decoded from its `major * 1000 + minor * 10` encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub fn from_encoded(encoded: i32) -> Self {
        let encoded = encoded.max(0) as u32;
        Self {
            major: encoded / 1000,
            minor: (encoded % 1000) / 10,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
