mod instrument;
mod product;

pub use instrument::InstrumentId;
pub use product::ProductInfo;
