//! Analytics core: pure, deterministic transformations from normalized
//! profile/post records into engagement metrics, hashtag performance,
//! competitive comparisons, and prospect scores.
//!
//! No I/O lives here. Acquisition is injected through [`source::ProfileSource`];
//! every function operates on an immutable batch and owns nothing beyond the
//! request that produced it.

pub mod compare;
pub mod hashtags;
pub mod keywords;
pub mod metrics;
pub mod normalize;
pub mod prospect;
pub mod source;

pub use source::ProfileSource;
