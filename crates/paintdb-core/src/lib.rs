pub mod entry;
pub mod error;
pub mod policy;
pub mod record;
pub mod report;
pub mod vendors;

pub use entry::{is_known_type, slugify, BrandData, Impcat, PaintEntry, PAINT_TYPES};
pub use error::ConfigError;
pub use policy::{
    BrandRules, IdSource, PolicySet, RangePolicy, SampleLayout, SamplePoint, TypeRule,
    VendorPolicy,
};
pub use record::{ImageKind, ImageRef, RawProductRecord};
pub use report::BatchReport;
