use chrono::Utc;
use gdal::Dataset;
use gdal::Metadata;

use crate::io::gdal::GdalError;

/// Key/value provenance embedded into every output GeoTIFF.
#[derive(Debug, Clone, Default)]
pub struct RasterProvenance {
    items: Vec<(String, String)>,
}

impl RasterProvenance {
    pub fn new(operation: &str) -> Self {
        let mut p = Self::default();
        p.insert("OPERATION", operation);
        p.insert("CONVERSION_TOOL", env!("CARGO_PKG_NAME"));
        p.insert("CONVERSION_VERSION", env!("CARGO_PKG_VERSION"));
        p.insert("CREATED_AT", &Utc::now().to_rfc3339());
        p
    }

    pub fn insert(&mut self, key: &str, value: &str) -> &mut Self {
        match self.items.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.items.push((key.to_string(), value.to_string())),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Embed provenance metadata into a GeoTIFF dataset (default domain)
pub fn embed_tiff_metadata(ds: &mut Dataset, provenance: &RasterProvenance) -> Result<(), GdalError> {
    for (key, value) in &provenance.items {
        ds.set_metadata_item(key, value, "")?;
    }
    Ok(())
}
