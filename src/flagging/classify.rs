//! Per-row flag classification.
//!
//! A NOAA flask status code is three characters wide; each position has an
//! independent meaning: rejection, selection, information. Each position is
//! a closed enumeration; any character outside it fails the row (and with
//! it, the file).

use tracing::warn;

use crate::error::ConvertError;
use crate::flagging::types::{
    ClassifiedRow, FLAG_BELOW_DETECTION_LIMIT, FLAG_CONTAMINATION, FLAG_FLASK_INCONSISTENCY,
    FLAG_INVALIDATED, FLAG_LOCAL_INFLUENCE, FLAG_MISSING, FLAG_NONSTANDARD_CONDITIONS,
    FLAG_SAMPLE_VOLUME, Tier,
};

/// First flag character: rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionFlag {
    /// 'P': inconsistency between the two flasks of a pair.
    FlaskInconsistency,
    /// 'V': insufficient sample volume.
    InsufficientVolume,
    /// 'A': no data obtained.
    NoData,
    /// '*': unstable baseline made the peak integration impossible.
    UnstableBaseline,
    /// 'D': below the detection limit.
    BelowDetectionLimit,
    /// 'C': contamination was found.
    Contamination,
    /// '.': not flagged.
    Unflagged,
}

impl RejectionFlag {
    pub fn from_char(c: char, line: usize) -> Result<Self, ConvertError> {
        match c {
            'P' => Ok(Self::FlaskInconsistency),
            'V' => Ok(Self::InsufficientVolume),
            'A' => Ok(Self::NoData),
            '*' => Ok(Self::UnstableBaseline),
            'D' => Ok(Self::BelowDetectionLimit),
            'C' => Ok(Self::Contamination),
            '.' => Ok(Self::Unflagged),
            character => Err(ConvertError::UnknownFlag {
                line,
                position: "REJECTION",
                character,
            }),
        }
    }
}

/// Second flag character: selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionFlag {
    /// 'X': suspected local influence.
    LocalInfluence,
    /// 'N': collected outside of optimal sampling conditions.
    NonStandardSampling,
    /// '.': not flagged.
    Unflagged,
}

impl SelectionFlag {
    pub fn from_char(c: char, line: usize) -> Result<Self, ConvertError> {
        match c {
            'X' => Ok(Self::LocalInfluence),
            'N' => Ok(Self::NonStandardSampling),
            '.' => Ok(Self::Unflagged),
            character => Err(ConvertError::UnknownFlag {
                line,
                position: "SELECTION",
                character,
            }),
        }
    }
}

/// Third flag character: information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InformationFlag {
    /// 'C': analysis was performed with a reduced sampling volume.
    ReducedVolume,
    /// 'P': measurement result is preliminary. Rejected outright.
    Preliminary,
    /// '.': not flagged.
    Unflagged,
}

impl InformationFlag {
    pub fn from_char(c: char, line: usize) -> Result<Self, ConvertError> {
        match c {
            'C' => Ok(Self::ReducedVolume),
            'P' => Ok(Self::Preliminary),
            '.' => Ok(Self::Unflagged),
            character => Err(ConvertError::UnknownFlag {
                line,
                position: "INFORMATION",
                character,
            }),
        }
    }
}

/// Classifies one row: decides its quality [`Tier`] and the destination
/// flag codes to propagate, substituting below-detection-limit values with
/// the detection limit.
///
/// # Errors
///
/// Fails on unknown flag characters, on flag/value contradictions, and on
/// preliminary data (which must not be used at all).
pub fn classify(
    value: Option<f64>,
    code: &str,
    line: usize,
    detection_limit: f64,
) -> Result<ClassifiedRow, ConvertError> {
    if code == "..." {
        // no flags, clean value: the fast path
        if value.is_none() {
            return Err(ConvertError::MissingDataInconsistency { line });
        }
        return Ok(ClassifiedRow {
            tier: Tier::Clean,
            flags: Vec::new(),
            value,
            below_lod_warning: false,
        });
    }

    let chars: Vec<char> = code.chars().collect();
    if chars.len() != 3 {
        return Err(ConvertError::MalformedRow {
            line,
            reason: format!("flag code '{}' is not 3 characters", code),
        });
    }

    let mut flags = Vec::new();
    let mut tier = Tier::Clean;
    let mut value = value;
    let mut below_lod_warning = false;

    match RejectionFlag::from_char(chars[0], line)? {
        RejectionFlag::FlaskInconsistency => {
            flags.push(FLAG_FLASK_INCONSISTENCY);
            if value.is_none() {
                flags.push(FLAG_MISSING);
            } else {
                flags.push(FLAG_INVALIDATED);
            }
            tier = Tier::Invalid;
        }
        RejectionFlag::InsufficientVolume => {
            flags.push(FLAG_SAMPLE_VOLUME);
            tier = Tier::Invalid;
        }
        RejectionFlag::NoData => {
            if let Some(v) = value {
                return Err(ConvertError::FlagValueConflict {
                    line,
                    flag: 'A',
                    value: v,
                });
            }
            flags.push(FLAG_MISSING);
            tier = Tier::Invalid;
        }
        RejectionFlag::UnstableBaseline => {
            flags.push(FLAG_INVALIDATED);
            tier = Tier::Invalid;
        }
        RejectionFlag::BelowDetectionLimit => {
            // Older revisions report BDL samples as missing, newer ones as
            // value 0.0; both are accepted. Anything else contradicts the flag.
            if let Some(v) = value {
                if v != 0.0 {
                    return Err(ConvertError::FlagValueConflict {
                        line,
                        flag: 'D',
                        value: v,
                    });
                }
            }
            flags.push(FLAG_BELOW_DETECTION_LIMIT);
            value = Some(detection_limit);
        }
        RejectionFlag::Contamination => {
            flags.push(FLAG_CONTAMINATION);
            tier = Tier::Invalid;
        }
        RejectionFlag::Unflagged => {}
    }

    // A reported value below the detection limit is substituted regardless
    // of how the row was flagged.
    if let Some(v) = value {
        if v < detection_limit {
            warn!(
                line,
                value = v,
                detection_limit,
                "value below detection limit, substituting"
            );
            flags.push(FLAG_BELOW_DETECTION_LIMIT);
            value = Some(detection_limit);
            below_lod_warning = true;
        }
    }

    match SelectionFlag::from_char(chars[1], line)? {
        SelectionFlag::LocalInfluence => {
            flags.push(FLAG_LOCAL_INFLUENCE);
            tier = tier.min(Tier::Caveated);
        }
        SelectionFlag::NonStandardSampling => {
            flags.push(FLAG_NONSTANDARD_CONDITIONS);
            tier = tier.min(Tier::Caveated);
        }
        SelectionFlag::Unflagged => {}
    }

    match InformationFlag::from_char(chars[2], line)? {
        InformationFlag::ReducedVolume => {
            flags.push(FLAG_NONSTANDARD_CONDITIONS);
        }
        InformationFlag::Preliminary => {
            return Err(ConvertError::PreliminaryData { line });
        }
        InformationFlag::Unflagged => {}
    }

    if value.is_none() {
        tier = Tier::Invalid;
        if !flags.contains(&FLAG_MISSING) {
            flags.push(FLAG_MISSING);
        }
    }

    Ok(ClassifiedRow {
        tier,
        flags,
        value,
        below_lod_warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOD: f64 = 5.0;

    #[test]
    fn test_clean_value_no_flags() {
        let row = classify(Some(12.5), "...", 1, LOD).unwrap();
        assert_eq!(row.tier, Tier::Clean);
        assert!(row.flags.is_empty());
        assert_eq!(row.value, Some(12.5));
    }

    #[test]
    fn test_no_flags_no_value_is_inconsistent() {
        let err = classify(None, "...", 7, LOD).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingDataInconsistency { line: 7 }
        ));
    }

    #[test]
    fn test_below_detection_limit_flag_substitutes() {
        let row = classify(None, "D..", 1, LOD).unwrap();
        assert_eq!(row.tier, Tier::Clean);
        assert_eq!(row.value, Some(LOD));
        assert!(row.flags.contains(&FLAG_BELOW_DETECTION_LIMIT));

        // value 0.0 is also accepted with flag D
        let row = classify(Some(0.0), "D..", 1, LOD).unwrap();
        assert_eq!(row.value, Some(LOD));
    }

    #[test]
    fn test_below_detection_limit_flag_with_value_fails() {
        let err = classify(Some(3.2), "D..", 4, LOD).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::FlagValueConflict { flag: 'D', .. }
        ));
    }

    #[test]
    fn test_value_below_detection_limit_substituted() {
        let row = classify(Some(2.0), ".X.", 1, LOD).unwrap();
        assert_eq!(row.value, Some(LOD));
        assert!(row.flags.contains(&FLAG_BELOW_DETECTION_LIMIT));
        assert!(row.below_lod_warning);
        // substitution alone does not change the tier; the selection flag does
        assert_eq!(row.tier, Tier::Caveated);
    }

    #[test]
    fn test_rejection_flags_invalidate() {
        let row = classify(Some(10.0), "*..", 1, LOD).unwrap();
        assert_eq!(row.tier, Tier::Invalid);
        assert_eq!(row.flags, vec![FLAG_INVALIDATED]);

        let row = classify(Some(10.0), "C..", 1, LOD).unwrap();
        assert_eq!(row.tier, Tier::Invalid);
        assert_eq!(row.flags, vec![FLAG_CONTAMINATION]);
    }

    #[test]
    fn test_flask_inconsistency_flags_depend_on_value() {
        let row = classify(Some(10.0), "P..", 1, LOD).unwrap();
        assert_eq!(row.flags, vec![FLAG_FLASK_INCONSISTENCY, FLAG_INVALIDATED]);
        assert_eq!(row.tier, Tier::Invalid);

        let row = classify(None, "P..", 1, LOD).unwrap();
        assert_eq!(row.flags, vec![FLAG_FLASK_INCONSISTENCY, FLAG_MISSING]);
        assert_eq!(row.tier, Tier::Invalid);
    }

    #[test]
    fn test_no_data_flag_with_value_fails() {
        let err = classify(Some(8.1), "A..", 3, LOD).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::FlagValueConflict { flag: 'A', .. }
        ));

        let row = classify(None, "A..", 3, LOD).unwrap();
        assert_eq!(row.flags, vec![FLAG_MISSING]);
        assert_eq!(row.tier, Tier::Invalid);
    }

    #[test]
    fn test_selection_flag_caveats() {
        let row = classify(Some(10.0), ".N.", 1, LOD).unwrap();
        assert_eq!(row.tier, Tier::Caveated);
        assert_eq!(row.flags, vec![FLAG_NONSTANDARD_CONDITIONS]);
    }

    #[test]
    fn test_information_flag_keeps_tier() {
        let row = classify(Some(10.0), "..C", 1, LOD).unwrap();
        assert_eq!(row.tier, Tier::Clean);
        assert_eq!(row.flags, vec![FLAG_NONSTANDARD_CONDITIONS]);
    }

    #[test]
    fn test_preliminary_data_is_fatal() {
        let err = classify(Some(10.0), "..P", 9, LOD).unwrap_err();
        assert!(matches!(err, ConvertError::PreliminaryData { line: 9 }));
    }

    #[test]
    fn test_missing_value_gets_missing_flag_once() {
        let row = classify(None, "V..", 1, LOD).unwrap();
        assert_eq!(row.flags, vec![FLAG_SAMPLE_VOLUME, FLAG_MISSING]);
        assert_eq!(row.tier, Tier::Invalid);
    }

    #[test]
    fn test_unknown_flag_characters() {
        for (code, position) in [("Z..", "REJECTION"), (".Z.", "SELECTION"), ("..Z", "INFORMATION")]
        {
            match classify(Some(1.0), code, 2, LOD).unwrap_err() {
                ConvertError::UnknownFlag {
                    line,
                    position: p,
                    character,
                } => {
                    assert_eq!(line, 2);
                    assert_eq!(p, position);
                    assert_eq!(character, 'Z');
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
