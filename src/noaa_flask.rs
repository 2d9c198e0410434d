//! NOAA GML NMHC flask converter: maps one parsed flask event file into
//! variables of an EBAS NASA-Ames output file.

use std::path::Path;

use chrono::Duration;

use crate::ebas::{
    EbasNasaAmes, FileMetadata, OutputRegistry, Variable, VariableMetadata, estimate_period_code,
    reference_date,
};
use crate::error::ConvertError;
use crate::flagging::aggregate::aggregate_series;
use crate::metadata::{
    DATA_ORIGINATOR_ORG, ORIGINATORS, Person, resolve_analytical, resolve_parameter,
    resolve_station, resolve_submitter,
};
use crate::parser::{FlaskFile, parse_flask_file};

pub const DEFAULT_REVISION: &str = "1";

// Identifying metadata element; a fixed code keeps consecutive
// submissions of one time series in the same dataset even when the
// actual sampling interval varies.
const RESOLUTION_CODE: &str = "1w";

// Time it takes to fill a flask.
const SAMPLE_DURATION: &str = "1mn";

const DATA_LEVEL: &str = "2";
const LAB_CODE: &str = "US13L";
const INSTR_TYPE: &str = "glass_flask";
const PROJECTS: &[&str] = &["GAW-WDCRG", "NOAA-GGGRN"];

fn sample_duration() -> Duration {
    Duration::minutes(1)
}

/// Result of one successfully converted input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub station_code: &'static str,
    pub parameter: &'static str,
    pub samples: usize,
    /// Below-detection-limit substitution warnings.
    pub warnings: u32,
}

/// Converts one NOAA flask file and appends its series to the registry.
///
/// The series merges into an open output file with matching station,
/// analytical metadata and sample intervals; otherwise a new file is
/// created. A new file is registered only after the conversion succeeded,
/// so errors never leave empty files behind.
pub fn convert_file(
    registry: &mut OutputRegistry,
    path: &Path,
    revision: &str,
) -> Result<FileOutcome, ConvertError> {
    let file = parse_flask_file(path)?;
    convert_series(registry, &file, revision)
}

pub fn convert_series(
    registry: &mut OutputRegistry,
    file: &FlaskFile,
    revision: &str,
) -> Result<FileOutcome, ConvertError> {
    let station = resolve_station(
        &file.site_code,
        file.latitude,
        file.longitude,
        file.elevation,
    )?;
    let analytical = resolve_analytical(&file.analysis_group, &file.analysis_instrument)?;
    let parameter = resolve_parameter(&file.parameter)?;
    let submitters: Vec<&'static Person> = file
        .contacts
        .iter()
        .map(|c| resolve_submitter(&c.name, &c.email))
        .collect::<Result<_, _>>()?;

    let sample_times = file.sample_times(sample_duration());
    let aggregated = aggregate_series(&file.bins, parameter.detection_limit)?;

    let base = VariableMetadata {
        regime: parameter.regime,
        matrix: parameter.matrix,
        comp_name: parameter.comp_name,
        unit: parameter.unit,
        statistics: "arithmetic mean",
    };
    let mut variables = Vec::with_capacity(3);
    variables.push(Variable {
        metadata: base.clone(),
        values: aggregated.samples.iter().map(|s| s.value).collect(),
        flags: aggregated
            .samples
            .iter()
            .map(|s| s.value_flags.clone())
            .collect(),
        rounding: aggregated.rounding,
    });
    variables.push(Variable {
        metadata: VariableMetadata {
            statistics: "stddev",
            ..base.clone()
        },
        values: aggregated.samples.iter().map(|s| s.stddev).collect(),
        flags: aggregated
            .samples
            .iter()
            .map(|s| s.stddev_flags.clone())
            .collect(),
        rounding: aggregated.rounding,
    });
    variables.push(Variable {
        metadata: VariableMetadata {
            statistics: "sample count",
            unit: "no unit",
            ..base
        },
        values: aggregated
            .samples
            .iter()
            .map(|s| Some(s.count as f64))
            .collect(),
        flags: aggregated
            .samples
            .iter()
            .map(|s| s.count_flags.clone())
            .collect(),
        rounding: 0,
    });

    let samples = aggregated.samples.len();

    match registry.find_mut(station, analytical, &sample_times) {
        Some(open) => open.variables.extend(variables),
        None => {
            let metadata = FileMetadata {
                station,
                analytical,
                mea_latitude: file.latitude,
                mea_longitude: file.longitude,
                mea_altitude: file.elevation,
                mea_height: file.intake_height,
                originators: ORIGINATORS,
                org: &DATA_ORIGINATOR_ORG,
                submitters,
                projects: PROJECTS,
                data_level: DATA_LEVEL,
                revision: revision.to_string(),
                period_code: estimate_period_code(
                    sample_times[0].0,
                    sample_times[sample_times.len() - 1].1,
                ),
                duration_code: SAMPLE_DURATION,
                resolution_code: RESOLUTION_CODE,
                reference_date: reference_date(&sample_times),
                lab_code: LAB_CODE,
                instr_type: INSTR_TYPE,
                instr_name: format!("glass_flask_{}", station.station_code),
            };
            registry.register(EbasNasaAmes {
                metadata,
                sample_times,
                variables,
            });
        }
    }

    Ok(FileOutcome {
        station_code: station.station_code,
        parameter: parameter.comp_name,
        samples,
        warnings: aggregated.warnings,
    })
}
