//! Services the binding core reads from but does not own: named assets and
//! per-document translation scopes.

mod assets;
mod scope;

pub use assets::{AssetCache, AssetCacheEntry, MemoryAssetCache};
pub use scope::{
    DocumentScopeFactory, NullResolutionScope, ResolutionScope, ResolutionScopeFactory,
    TranslationScope,
};
