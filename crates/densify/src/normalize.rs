//! Value normalization: validate raw samples and annotate them for rendering.

use aqi_common::{PointCollection, RawSample, SamplePoint, SkipCounts, SkipReason};
use tracing::{debug, warn};

pub use aqi_common::{category, intensity, AqiCategory, CategoryInfo};

/// Category lookup in its serializable `{ color, label }` form.
pub fn category_info(value: f64) -> CategoryInfo {
    category(value).info()
}

/// Validate one raw sample and annotate it as a measured point.
///
/// Coordinates and value must be finite. The value range is not checked.
pub fn normalize(raw: &RawSample) -> Result<SamplePoint, SkipReason> {
    if !raw.lon.is_finite() || !raw.lat.is_finite() {
        return Err(SkipReason::NonFiniteCoordinate);
    }
    if !raw.value.is_finite() {
        return Err(SkipReason::NonFiniteValue);
    }
    Ok(SamplePoint::measured(raw.lon, raw.lat, raw.value))
}

/// Normalize a batch, keeping input order and tallying rejected samples.
pub fn normalize_all(raws: &[RawSample]) -> (PointCollection, SkipCounts) {
    let mut points = Vec::with_capacity(raws.len());
    let mut skipped = SkipCounts::new();

    for (idx, raw) in raws.iter().enumerate() {
        match normalize(raw) {
            Ok(point) => points.push(point),
            Err(reason) => {
                debug!(index = idx, reason = %reason, "Rejecting sample");
                skipped.record(reason);
            }
        }
    }

    if !skipped.is_empty() {
        warn!(
            accepted = points.len(),
            rejected = skipped.total(),
            "Some samples were rejected during normalization"
        );
    }

    (PointCollection::new(points), skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_common::Provenance;

    #[test]
    fn test_normalize_valid() {
        let point = normalize(&RawSample::new(77.1, 28.6, 125.0)).unwrap();
        assert_eq!(point.provenance, Provenance::Measured);
        assert_eq!(point.intensity, 0.25);
    }

    #[test]
    fn test_out_of_range_value_passes_through() {
        let point = normalize(&RawSample::new(0.0, 0.0, 900.0)).unwrap();
        assert_eq!(point.intensity, 1.8);
        let point = normalize(&RawSample::new(0.0, 0.0, -5.0)).unwrap();
        assert_eq!(point.intensity, -0.01);
    }

    #[test]
    fn test_normalize_rejects_non_finite() {
        assert_eq!(
            normalize(&RawSample::new(f64::NAN, 28.6, 10.0)),
            Err(SkipReason::NonFiniteCoordinate)
        );
        assert_eq!(
            normalize(&RawSample::new(77.1, f64::INFINITY, 10.0)),
            Err(SkipReason::NonFiniteCoordinate)
        );
        assert_eq!(
            normalize(&RawSample::new(77.1, 28.6, f64::NAN)),
            Err(SkipReason::NonFiniteValue)
        );
    }

    #[test]
    fn test_normalize_all_keeps_order_and_counts() {
        let raws = [
            RawSample::new(1.0, 1.0, 10.0),
            RawSample::new(f64::NAN, 1.0, 20.0),
            RawSample::new(2.0, 2.0, 30.0),
            RawSample::new(3.0, 3.0, f64::NEG_INFINITY),
        ];
        let (collection, skipped) = normalize_all(&raws);
        let values: Vec<f64> = collection.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.0, 30.0]);
        assert_eq!(skipped.get(SkipReason::NonFiniteCoordinate), 1);
        assert_eq!(skipped.get(SkipReason::NonFiniteValue), 1);
    }

    #[test]
    fn test_category_info() {
        let info = category_info(42.0);
        assert_eq!(info.label, "Good");
        assert_eq!(info.color, "#00E400");
    }
}
