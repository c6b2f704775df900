use athena_core::{InstrumentId, ProductInfo};

/// Port for instrument/product metadata
///
/// Separate from [`crate::HftEngine`] because a context may run without
/// a product manager attached (e.g. bare replays).
pub trait ProductCatalog {
    /// Look up a product by instrument code (`SHFE.ag.HOT`) or product code (`SHFE.ag`)
    fn product_info(&self, code: &InstrumentId) -> Option<ProductInfo>;
}
