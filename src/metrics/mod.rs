//! Derived metrics over an immutable dataset.
//!
//! Every derivation here is a pure function of its inputs. A derivation that
//! cannot be computed for some subset (no rows, too few points, zero means)
//! leaves that subset out of its output instead of failing the batch.

pub mod best;
pub mod complexity;
pub mod normalize;
pub mod recommend;
pub mod speedup;

pub use best::best_cases;
pub use complexity::{ComplexityFit, complexity_fits};
pub use normalize::{Table, normalize_rows};
pub use recommend::{Bucket, BucketField, Comparison, Predicate, Recommendation, recommend};
pub use speedup::{parallel_speedups, speedup_by};
