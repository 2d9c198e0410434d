//! Collapses classified rows into one aggregate sample per time bin.

use crate::error::ConvertError;
use crate::flagging::classify::classify;
use crate::flagging::types::{
    AggregateSample, ClassifiedRow, FLAG_MISSING, FLAG_STAT_UNDEFINED, Tier,
};
use crate::flagging::utility::{mean, round_to, series_rounding, stddev};
use crate::parser::SampleBin;

/// Result of aggregating one series.
#[derive(Debug)]
pub struct AggregatedSeries {
    pub samples: Vec<AggregateSample>,
    /// Rounding precision applied to all means and standard deviations,
    /// derived once from the digit statistics of the whole input series.
    pub rounding: i32,
    /// Number of below-detection-limit substitution warnings.
    pub warnings: u32,
}

/// Classifies every row and aggregates each time bin: rows of the highest
/// quality tier present in the bin are averaged; invalid rows never
/// contribute. A bin with only invalid rows becomes a missing sample.
///
/// # Errors
///
/// Any classification error aborts the whole series.
// TODO: a single malformed row flag fails the whole file while metadata
// problems already skip per file; decide whether rows should be skippable.
pub fn aggregate_series(
    bins: &[SampleBin],
    detection_limit: f64,
) -> Result<AggregatedSeries, ConvertError> {
    // One global rounding decision for the series, taken from the raw
    // values before any detection-limit substitution.
    let rounding = series_rounding(
        bins.iter()
            .flat_map(|bin| bin.rows.iter().filter_map(|row| row.value)),
    );

    let mut samples = Vec::with_capacity(bins.len());
    let mut warnings = 0u32;

    for bin in bins {
        let classified: Vec<ClassifiedRow> = bin
            .rows
            .iter()
            .map(|row| classify(row.value, &row.flag, row.line, detection_limit))
            .collect::<Result<_, _>>()?;
        warnings += classified.iter().filter(|c| c.below_lod_warning).count() as u32;

        let Some(max_tier) = classified.iter().map(|c| c.tier).max() else {
            continue;
        };

        if max_tier == Tier::Invalid {
            samples.push(AggregateSample {
                time: bin.time,
                value: None,
                value_flags: vec![FLAG_MISSING],
                stddev: None,
                stddev_flags: vec![FLAG_STAT_UNDEFINED],
                count: 0,
                count_flags: Vec::new(),
            });
            continue;
        }

        let contributing: Vec<&ClassifiedRow> =
            classified.iter().filter(|c| c.tier == max_tier).collect();
        let values: Vec<f64> = contributing.iter().filter_map(|c| c.value).collect();

        // union of the contributing rows' flags, first-insertion order
        let mut flags: Vec<u16> = Vec::new();
        for row in &contributing {
            for flag in &row.flags {
                if !flags.contains(flag) {
                    flags.push(*flag);
                }
            }
        }

        let avg = round_to(mean(&values), rounding);
        let (sd, stddev_flags) = match stddev(&values, mean(&values)) {
            Some(sd) => (Some(round_to(sd, rounding)), flags.clone()),
            None => {
                let mut f = flags.clone();
                f.push(FLAG_STAT_UNDEFINED);
                (None, f)
            }
        };

        samples.push(AggregateSample {
            time: bin.time,
            value: Some(avg),
            value_flags: flags,
            stddev: sd,
            stddev_flags,
            count: contributing.len(),
            count_flags: Vec::new(),
        });
    }

    Ok(AggregatedSeries {
        samples,
        rounding,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flagging::types::{FLAG_LOCAL_INFLUENCE, FLAG_NONSTANDARD_CONDITIONS};
    use crate::parser::FlaskRow;
    use chrono::{TimeZone, Utc};

    const LOD: f64 = 5.0;

    fn bin(rows: Vec<(Option<f64>, &str)>) -> SampleBin {
        let time = Utc.with_ymd_and_hms(2020, 1, 7, 11, 30, 0).unwrap();
        SampleBin {
            time,
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(i, (value, flag))| FlaskRow {
                    line: i + 1,
                    time,
                    value,
                    flag: flag.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_clean_pair_averages() {
        let bins = [bin(vec![(Some(10.0), "..."), (Some(12.0), "...")])];
        let agg = aggregate_series(&bins, LOD).unwrap();
        let sample = &agg.samples[0];

        assert_eq!(sample.value, Some(11.0));
        assert_eq!(sample.count, 2);
        assert!(sample.value_flags.is_empty());
        assert!(sample.stddev.is_some());
        assert!(sample.stddev_flags.is_empty());
    }

    #[test]
    fn test_mixed_tiers_use_only_highest() {
        // two clean rows and one caveated: only the clean pair contributes
        let bins = [bin(vec![
            (Some(10.0), "..."),
            (Some(12.0), "..."),
            (Some(100.0), ".X."),
        ])];
        let agg = aggregate_series(&bins, LOD).unwrap();
        let sample = &agg.samples[0];

        assert_eq!(sample.count, 2);
        assert_eq!(sample.value, Some(11.0));
        assert!(!sample.value_flags.contains(&FLAG_LOCAL_INFLUENCE));
    }

    #[test]
    fn test_caveated_rows_used_when_no_clean_row() {
        let bins = [bin(vec![(Some(10.0), ".N."), (Some(14.0), ".N.")])];
        let agg = aggregate_series(&bins, LOD).unwrap();
        let sample = &agg.samples[0];

        assert_eq!(sample.count, 2);
        assert_eq!(sample.value, Some(12.0));
        assert_eq!(sample.value_flags, vec![FLAG_NONSTANDARD_CONDITIONS]);
        assert_eq!(sample.stddev_flags, vec![FLAG_NONSTANDARD_CONDITIONS]);
    }

    #[test]
    fn test_all_invalid_bin_is_missing() {
        let bins = [bin(vec![(Some(10.0), "*.."), (None, "A..")])];
        let agg = aggregate_series(&bins, LOD).unwrap();
        let sample = &agg.samples[0];

        assert_eq!(sample.value, None);
        assert_eq!(sample.value_flags, vec![FLAG_MISSING]);
        assert_eq!(sample.stddev, None);
        assert_eq!(sample.stddev_flags, vec![FLAG_STAT_UNDEFINED]);
        assert_eq!(sample.count, 0);
        assert!(sample.count_flags.is_empty());
    }

    #[test]
    fn test_invalid_row_contributes_nothing() {
        // the invalid row is excluded from both the average and the flags
        let bins = [bin(vec![(Some(8.0), "..."), (None, "A..")])];
        let agg = aggregate_series(&bins, LOD).unwrap();
        let sample = &agg.samples[0];

        assert_eq!(sample.value, Some(8.0));
        assert_eq!(sample.count, 1);
        assert!(sample.value_flags.is_empty());
    }

    #[test]
    fn test_single_row_has_no_stddev() {
        let bins = [bin(vec![(Some(8.5), "...")])];
        let agg = aggregate_series(&bins, LOD).unwrap();
        let sample = &agg.samples[0];

        assert_eq!(sample.stddev, None);
        assert_eq!(sample.stddev_flags, vec![FLAG_STAT_UNDEFINED]);
        assert_eq!(sample.count, 1);
    }

    #[test]
    fn test_rounding_follows_input_precision() {
        // inputs carry one decimal, so aggregates are rounded to one decimal
        let bins = [bin(vec![(Some(10.4), "..."), (Some(10.8), "...")])];
        let agg = aggregate_series(&bins, LOD).unwrap();

        assert_eq!(agg.rounding, 1);
        assert_eq!(agg.samples[0].value, Some(10.6));
    }

    #[test]
    fn test_classification_error_aborts_series() {
        let bins = [
            bin(vec![(Some(10.0), "...")]),
            bin(vec![(Some(11.0), "Z..")]),
        ];
        let err = aggregate_series(&bins, LOD).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownFlag { .. }));
    }

    #[test]
    fn test_below_lod_warning_counted() {
        // the unflagged fast path skips the detection-limit check, so the
        // low value needs at least one flag character set
        let bins = [bin(vec![(Some(2.0), "..C"), (Some(10.0), "...")])];
        let agg = aggregate_series(&bins, LOD).unwrap();
        assert_eq!(agg.warnings, 1);
    }
}
