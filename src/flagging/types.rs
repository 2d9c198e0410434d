//! Data types used by the classification and aggregation pipeline.

use chrono::{DateTime, Utc};

/// EBAS flag codes emitted by the converters. The flag vocabulary itself is
/// a closed registry defined by the destination format; only the codes used
/// here are named.
pub const FLAG_MISSING: u16 = 999;
/// Statistics could not be calculated (fewer than 2 contributing samples).
pub const FLAG_STAT_UNDEFINED: u16 = 899;
pub const FLAG_BELOW_DETECTION_LIMIT: u16 = 781;
/// Sampling or analysis outside standard conditions.
pub const FLAG_NONSTANDARD_CONDITIONS: u16 = 660;
/// Insufficient sample volume for analysis.
pub const FLAG_SAMPLE_VOLUME: u16 = 658;
/// Contamination found in the sample.
pub const FLAG_CONTAMINATION: u16 = 599;
/// Suspected local influence at the sampling site.
pub const FLAG_LOCAL_INFLUENCE: u16 = 559;
/// Inconsistency between the two flasks of a sample pair.
pub const FLAG_FLASK_INCONSISTENCY: u16 = 499;
/// Invalidated by the data originator.
pub const FLAG_INVALIDATED: u16 = 456;

/// Ordinal data quality classification of one row.
///
/// Aggregation only uses rows of the highest tier present in a time bin;
/// `Invalid` rows never contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// Never used for aggregation.
    Invalid = 1,
    /// Valid with quality issues, used only if no clean row exists.
    Caveated = 2,
    /// Fully valid, preferred for aggregation.
    Clean = 3,
}

/// One row after flag classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub tier: Tier,
    /// Destination flag codes in first-insertion order. Deduplication
    /// happens at the aggregation step.
    pub flags: Vec<u16>,
    /// Value after detection-limit substitution; `None` for missing.
    pub value: Option<f64>,
    /// True if the below-detection-limit substitution warning fired.
    pub below_lod_warning: bool,
}

/// One output time bin after aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSample {
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
    pub value_flags: Vec<u16>,
    pub stddev: Option<f64>,
    pub stddev_flags: Vec<u16>,
    pub count: usize,
    pub count_flags: Vec<u16>,
}
