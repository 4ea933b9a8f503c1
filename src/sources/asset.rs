use std::rc::Rc;

use super::{read_only, ValueSource};
use crate::content::{AssetCache, AssetCacheEntry};
use crate::error::BindingError;
use crate::model::Value;

/// A named asset. The name is itself a source, so `{@<Path}` can switch
/// assets at runtime.
pub struct AssetSource {
    cache: Rc<dyn AssetCache>,
    name: Box<dyn ValueSource>,
    entry: Option<Rc<dyn AssetCacheEntry>>,
}

impl AssetSource {
    pub fn new(cache: Rc<dyn AssetCache>, name: Box<dyn ValueSource>) -> Self {
        Self {
            cache,
            name,
            entry: None,
        }
    }

    fn asset_name(&self) -> String {
        self.name.value().to_string()
    }
}

impl ValueSource for AssetSource {
    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        false
    }

    fn display_name(&self) -> String {
        format!("Asset@{}", self.asset_name())
    }

    fn value(&self) -> Value {
        self.entry
            .as_ref()
            .map(|entry| entry.value())
            .unwrap_or_default()
    }

    fn set_value(&mut self, _value: Value) -> Result<(), BindingError> {
        Err(read_only("an asset"))
    }

    /// Looks the asset up again on force, on a name change, while it is
    /// missing, or once the held entry has gone stale. A miss that follows a
    /// miss reports no change.
    fn update(&mut self, force: bool) -> bool {
        let name_changed = self.name.update(force);
        let stale = self.entry.as_ref().map_or(true, |entry| !entry.is_valid());
        if !(force || name_changed || stale) {
            return false;
        }
        let had_entry = self.entry.is_some();
        let name = self.asset_name();
        self.entry = if name.is_empty() {
            None
        } else {
            self.cache.get(&name)
        };
        if self.entry.is_none() {
            tracing::trace!(asset = %name, "asset not found");
        }
        force || had_entry || self.entry.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryAssetCache;
    use crate::sources::ConstantSource;

    fn source(cache: &Rc<MemoryAssetCache>, name: &str) -> AssetSource {
        AssetSource::new(cache.clone(), Box::new(ConstantSource::new(name)))
    }

    #[test]
    fn reloads_when_entry_goes_stale() {
        let cache = Rc::new(MemoryAssetCache::new());
        cache.put("Sprites/A", "v1");
        let mut asset = source(&cache, "Sprites/A");
        assert!(asset.update(true));
        assert_eq!(asset.value(), Value::from("v1"));
        assert!(!asset.update(false));

        cache.put("Sprites/A", "v2");
        assert!(asset.update(false));
        assert_eq!(asset.value(), Value::from("v2"));
    }

    #[test]
    fn repeated_miss_is_not_a_change() {
        let cache = Rc::new(MemoryAssetCache::new());
        let mut asset = source(&cache, "Missing");
        asset.update(true);
        assert!(asset.value().is_null());
        assert!(!asset.update(false));

        cache.put("Missing", 1);
        assert!(asset.update(false));
        assert_eq!(asset.value(), Value::Int(1));
    }

    #[test]
    fn is_read_only() {
        let cache = Rc::new(MemoryAssetCache::new());
        let mut asset = source(&cache, "x");
        assert!(!asset.can_write());
        assert!(asset.set_value(Value::Null).is_err());
        assert_eq!(asset.display_name(), "Asset@x");
    }
}
