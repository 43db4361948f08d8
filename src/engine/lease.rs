//! Scoped extension checkout. The extension is checked back in when the
//! lease is dropped, on every exit path including early `?` returns and
//! unwinding panics.
use tracing::{info, warn};

use crate::engine::Geoprocessor;
use crate::error::Result;

pub struct ExtensionLease<'a, G: Geoprocessor + ?Sized> {
    engine: &'a G,
    name: String,
}

impl<'a, G: Geoprocessor + ?Sized> ExtensionLease<'a, G> {
    pub fn acquire(engine: &'a G, name: &str) -> Result<Self> {
        engine.check_out_extension(name)?;
        info!("Checked out extension '{}'", name);
        Ok(Self {
            engine,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<G: Geoprocessor + ?Sized> Drop for ExtensionLease<'_, G> {
    fn drop(&mut self) {
        match self.engine.check_in_extension(&self.name) {
            Ok(()) => info!("Checked in extension '{}'", self.name),
            Err(e) => warn!("Failed to check in extension '{}': {}", self.name, e),
        }
    }
}
