use super::attributes::{Attributes, AttributesTable};
use std::fmt;

/// Options shared by the readers and writers.
///
/// ```
/// use geojson_codec::Settings;
///
/// let settings: Settings = Settings::default().skip_invalid_geometry(true);
/// assert!(settings.skip_invalid_geometry);
/// ```
pub struct Settings<A = Attributes> {
    /// If set, line strings and rings with fewer than two coordinates are
    /// dropped instead of failing the whole document.
    pub skip_invalid_geometry: bool,
    /// Creates the empty attribute table for every decoded feature.
    pub attributes_factory: fn() -> A,
}

impl<A: AttributesTable + Default> Default for Settings<A> {
    fn default() -> Self {
        Settings {
            skip_invalid_geometry: false,
            attributes_factory: A::default,
        }
    }
}

impl<A> Settings<A> {
    pub fn skip_invalid_geometry(mut self, skip: bool) -> Self {
        self.skip_invalid_geometry = skip;
        self
    }

    /// Switches to a different attribute storage.
    pub fn with_attributes_factory<B: AttributesTable>(self, factory: fn() -> B) -> Settings<B> {
        Settings {
            skip_invalid_geometry: self.skip_invalid_geometry,
            attributes_factory: factory,
        }
    }

    pub(crate) fn new_attributes(&self) -> A {
        (self.attributes_factory)()
    }
}

impl<A> Clone for Settings<A> {
    fn clone(&self) -> Self {
        Settings {
            skip_invalid_geometry: self.skip_invalid_geometry,
            attributes_factory: self.attributes_factory,
        }
    }
}

impl<A> fmt::Debug for Settings<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("skip_invalid_geometry", &self.skip_invalid_geometry)
            .finish()
    }
}
