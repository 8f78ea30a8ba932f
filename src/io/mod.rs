mod deflate;
#[cfg(feature = "inspect")]
mod inspect;

pub use deflate::{compress, inflate, write_tile};
#[cfg(feature = "inspect")]
pub use inspect::{inspect_tile, FeatureSummary, LayerSummary};
