//! Batch orchestration: one bounded-concurrency task per record, then the
//! dedupe → validate → assemble barrier.
//!
//! Workers share no mutable state; each task reads its own record and
//! produces its own entry. The only suspension point is the image fetch.
//! Task completion order is unconstrained, so results are re-keyed to
//! submission order at the barrier — the final catalog is identical for
//! pool size 1 and pool size N. A single record's fetch or decode failure
//! degrades that record's hex to empty and never aborts siblings; nothing
//! is retried here (retry belongs to the fetch collaborator).

use futures::stream::{self, StreamExt};
use regex::Regex;

use paintdb_core::{
    slugify, BatchReport, IdSource, ImageKind, ImageRef, Impcat, PaintEntry, RangePolicy,
    RawProductRecord, VendorPolicy,
};

use crate::assemble::assemble;
use crate::brand_data::{extract_brand_data, fold_secondary_hex};
use crate::classify::is_individual_paint;
use crate::dedupe::{dedupe, DedupeOutcome};
use crate::error::CatalogError;
use crate::fetch::ImageFetcher;
use crate::name::normalize_name;
use crate::paint_type::infer_type;
use crate::sampler::{hex_string, sample_primary, sample_secondary, SwatchColor};
use crate::validate::{passes, Issue, Validator};

/// Tuning knobs for one batch run.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Worker pool bound. Not a correctness parameter — output is
    /// identical for any value — just protection for the image source.
    pub pool_size: usize,

    /// Skip image fetching and sampling entirely (all entries get an
    /// empty hex). Useful for fast structural runs.
    pub sample_colors: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            pool_size: 8,
            sample_colors: true,
        }
    }
}

/// A finished batch: ordered entries plus the counters for reporting.
#[derive(Debug)]
pub struct BatchOutput {
    pub entries: Vec<PaintEntry>,
    pub report: BatchReport,
}

/// Processes one vendor range end to end.
///
/// # Errors
///
/// Returns [`CatalogError`] only for configuration problems (unknown
/// range key, uncompilable policy pattern). Per-record failures never
/// error the batch; they degrade the affected entry and are counted in
/// the report.
pub async fn run_batch<F: ImageFetcher>(
    records: Vec<RawProductRecord>,
    policy: &VendorPolicy,
    range_key: &str,
    fetcher: &F,
    options: BatchOptions,
) -> Result<BatchOutput, CatalogError> {
    let range = policy.range(range_key)?;
    let validator = Validator::new(policy)?;
    let sku_trim = compile_sku_trim(policy)?;
    let sku_trim = sku_trim.as_ref();

    let total_records = records.len();
    tracing::info!(
        vendor = %policy.id_prefix,
        range = %range.key,
        records = total_records,
        "processing batch"
    );

    let sample_colors = options.sample_colors;
    let mut results: Vec<(usize, Option<(PaintEntry, SwatchColor)>)> =
        stream::iter(records.into_iter().enumerate())
            .map(|(index, record)| async move {
                let outcome =
                    process_record(record, policy, range, fetcher, sku_trim, sample_colors).await;
                (index, outcome)
            })
            .buffer_unordered(options.pool_size.max(1))
            .collect()
            .await;

    // Workers finish in arbitrary order; restore submission order so the
    // dedupe first-seen tie-break does not depend on scheduling.
    results.sort_unstable_by_key(|&(index, _)| index);

    let mut report = BatchReport {
        total_records,
        ..BatchReport::default()
    };

    let mut entries = Vec::new();
    for (_, outcome) in results {
        match outcome {
            Some((entry, _color)) => entries.push(entry),
            None => report.skipped_non_paint += 1,
        }
    }

    let DedupeOutcome { entries, collapsed } = dedupe(entries);
    report.duplicates_collapsed = collapsed;

    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        let issues = validator.validate(&entry);
        if !passes(&issues) {
            report.rejected_critical += 1;
            tracing::warn!(
                id = %entry.id,
                name = %entry.name,
                issues = ?issues,
                "dropping entry with critical validation issues"
            );
            continue;
        }
        if entry.hex.is_empty() {
            report.missing_hex += 1;
        }
        if issues.contains(&Issue::InvalidSku) {
            report.missing_sku += 1;
        }
        kept.push(entry);
    }

    if report.missing_hex > 0 {
        tracing::warn!(count = report.missing_hex, "entries without a sampled color");
    }
    if report.missing_sku > 0 {
        tracing::warn!(count = report.missing_sku, "entries with missing or malformed SKU");
    }
    if report.duplicates_collapsed > 0 {
        tracing::info!(count = report.duplicates_collapsed, "size duplicates collapsed");
    }

    Ok(BatchOutput {
        entries: assemble(kept),
        report,
    })
}

fn compile_sku_trim(policy: &VendorPolicy) -> Result<Option<Regex>, CatalogError> {
    policy
        .sku_trim
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(|e| CatalogError::Policy {
            vendor: policy.id_prefix.clone(),
            reason: format!("invalid sku_trim regex: {e}"),
        })
}

/// Runs the per-record stages: classify, normalize, infer, extract,
/// sample. Returns `None` for records classified as non-paint products.
async fn process_record<F: ImageFetcher>(
    record: RawProductRecord,
    policy: &VendorPolicy,
    range: &RangePolicy,
    fetcher: &F,
    sku_trim: Option<&Regex>,
    sample_colors: bool,
) -> Option<(PaintEntry, SwatchColor)> {
    if !is_individual_paint(&record, policy) {
        tracing::debug!(
            vendor = %policy.id_prefix,
            title = %record.title,
            "skipping non-paint product"
        );
        return None;
    }

    let name = normalize_name(&record.title, policy);
    let paint_type = infer_type(
        &record.title,
        record.type_hint.as_deref(),
        &range.default_type,
        &policy.type_priority,
    );
    let mut brand_data = extract_brand_data(&record, &range.key, &name, &policy.brand_rules);

    let color = if sample_colors {
        sample_record_color(&record, policy, fetcher, &mut brand_data).await
    } else {
        SwatchColor::NotFound
    };

    let sku = clean_sku(&record.sku, sku_trim);
    let id = entry_id(policy, &record, &name, &sku);

    let entry = PaintEntry {
        brand: policy.brand.clone(),
        brand_data,
        category: String::new(),
        discontinued: false,
        hex: color.hex().to_string(),
        id,
        impcat: Impcat::default(),
        name,
        range: range.range.clone(),
        sku,
        paint_type,
        url: record.url,
    };

    Some((entry, color))
}

/// Fetches the swatch image and samples the primary (and, for shifting
/// paints, secondary) color. Any fetch or decode failure degrades to
/// `Unavailable` — empty hex, batch continues.
async fn sample_record_color<F: ImageFetcher>(
    record: &RawProductRecord,
    policy: &VendorPolicy,
    fetcher: &F,
    brand_data: &mut paintdb_core::BrandData,
) -> SwatchColor {
    let Some(image) = select_swatch_ref(&record.image_refs) else {
        return SwatchColor::Unavailable;
    };

    let pixels = match fetcher.fetch(image).await {
        Ok(pixels) => pixels,
        Err(e) => {
            tracing::warn!(
                vendor = %policy.id_prefix,
                identifier = %record.identifier,
                error = %e,
                "image fetch failed; entry keeps an empty hex"
            );
            return SwatchColor::Unavailable;
        }
    };

    let layout = policy.layout_for(image.kind);
    let rgb = sample_primary(&pixels, layout);
    let hex = hex_string(rgb);

    if brand_data.flag("colorShift") {
        if let Some(secondary_layout) = &policy.secondary_layout {
            let secondary = sample_secondary(&pixels, secondary_layout);
            fold_secondary_hex(brand_data, &hex, secondary);
        }
    }

    SwatchColor::Sampled(hex)
}

/// Picks which image to sample. An explicit swatch shot wins; failing
/// that, a location that names itself a swatch; failing that, the second
/// image (vendors usually put the bottle first and the swatch second),
/// then the first.
fn select_swatch_ref(refs: &[ImageRef]) -> Option<&ImageRef> {
    refs.iter()
        .find(|r| r.kind == ImageKind::Swatch)
        .or_else(|| {
            refs.iter()
                .find(|r| r.location.to_lowercase().contains("swatch"))
        })
        .or_else(|| refs.get(1))
        .or_else(|| refs.first())
}

/// Applies the policy's SKU trim pattern (e.g. `"TDK015014_1"` →
/// `"TDK015014"`).
fn clean_sku(sku: &str, trim: Option<&Regex>) -> String {
    let sku = sku.trim();
    match trim {
        Some(pattern) => pattern.replace(sku, "").into_owned(),
        None => sku.to_string(),
    }
}

/// Builds the entry id from the policy's configured source field. An
/// unresolvable slug yields an empty id, which the Validator rejects as
/// critical.
fn entry_id(
    policy: &VendorPolicy,
    record: &RawProductRecord,
    name: &str,
    sku: &str,
) -> String {
    let source = match policy.id_source {
        IdSource::Identifier => record.identifier.as_str(),
        IdSource::Name => name,
        IdSource::Sku => sku,
    };
    let mut slug = slugify(source);
    for suffix in &policy.id_strip_suffixes {
        if let Some(stripped) = slug.strip_suffix(suffix.as_str()) {
            slug = stripped.to_string();
            break;
        }
    }
    if slug.is_empty() {
        String::new()
    } else {
        format!("{}-{}", policy.id_prefix, slug)
    }
}
