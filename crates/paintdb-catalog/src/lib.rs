pub mod assemble;
pub mod audit;
pub mod batch;
pub mod brand_data;
pub mod classify;
pub mod dedupe;
pub mod error;
pub mod fetch;
pub mod name;
pub mod paint_type;
pub mod sampler;
pub mod validate;

pub use assemble::{assemble, partition_by_range, RangeGroup};
pub use audit::{audit_catalog, CatalogAudit};
pub use batch::{run_batch, BatchOptions, BatchOutput};
pub use brand_data::extract_brand_data;
pub use classify::is_individual_paint;
pub use dedupe::{dedupe, DedupeOutcome};
pub use error::{CatalogError, FetchError};
pub use fetch::{decode_pixels, ImageFetcher};
pub use name::normalize_name;
pub use paint_type::infer_type;
pub use sampler::{sample_primary, sample_secondary, PixelBuffer, SwatchColor};
pub use validate::{Issue, Validator};
