//! Thin parser for the NOAA GML NMHC flask event file format.
//!
//! The format is whitespace-delimited text with a `#`-prefixed header
//! block. `# key: value` pairs carry file metadata; the `data_fields`
//! header names the data columns. The parser returns plain in-memory rows
//! grouped into time bins; all interpretation happens downstream.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::ConvertError;

/// `analysis_value` sentinel for a missing measurement.
const VALUE_MISSING: f64 = 999.99;

/// A contact person from the file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

/// One measurement event: a flask analysis at a sample time.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaskRow {
    /// 1-based physical line number in the input file.
    pub line: usize,
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
    /// Raw 3-character status code.
    pub flag: String,
}

/// All rows sharing one sample timestamp (typically a flask pair).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBin {
    pub time: DateTime<Utc>,
    pub rows: Vec<FlaskRow>,
}

/// One parsed input file: a homogeneous series of flask events.
#[derive(Debug, Clone)]
pub struct FlaskFile {
    pub site_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub intake_height: f64,
    pub parameter: String,
    pub analysis_group: String,
    pub analysis_instrument: String,
    pub contacts: Vec<Contact>,
    pub bins: Vec<SampleBin>,
}

impl FlaskFile {
    /// Sample intervals for the EBAS time axes, one per bin.
    pub fn sample_times(&self, duration: chrono::Duration) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.bins
            .iter()
            .map(|b| (b.time, b.time + duration))
            .collect()
    }
}

pub fn parse_flask_file(path: &Path) -> Result<FlaskFile, ConvertError> {
    parse_flask_str(&fs::read_to_string(path)?)
}

pub fn parse_flask_str(content: &str) -> Result<FlaskFile, ConvertError> {
    let lines: Vec<&str> = content.lines().collect();

    // header block: "# key: value" pairs, keys may repeat (contacts)
    let mut headers: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut header_lines = 0usize;
    for line in &lines {
        if !line.starts_with('#') {
            break;
        }
        header_lines += 1;
        let body = line.trim_start_matches('#').trim();
        if let Some((key, value)) = body.split_once(':') {
            headers.entry(key.trim()).or_default().push(value.trim());
        }
    }
    if let Some(declared) = headers.get("number_of_header_lines") {
        let declared: usize = declared[0]
            .parse()
            .map_err(|_| ConvertError::MalformedHeader("bad number_of_header_lines".into()))?;
        if declared != header_lines {
            return Err(ConvertError::MalformedHeader(format!(
                "number_of_header_lines is {} but {} header lines found",
                declared, header_lines
            )));
        }
    }

    let columns: Vec<&str> = headers
        .get("data_fields")
        .map(|v| v[0].split_whitespace().collect())
        .ok_or_else(|| ConvertError::MalformedHeader("missing data_fields".into()))?;
    let col = |name: &'static str| -> Result<usize, ConvertError> {
        columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| ConvertError::MalformedHeader(format!("missing column '{}'", name)))
    };

    let c_site = col("sample_site_code")?;
    let c_year = col("sample_year")?;
    let c_month = col("sample_month")?;
    let c_day = col("sample_day")?;
    let c_hour = col("sample_hour")?;
    let c_minute = col("sample_minute")?;
    let c_seconds = col("sample_seconds")?;
    let c_parameter = col("parameter_formula")?;
    let c_group = col("analysis_group_abbr")?;
    let c_value = col("analysis_value")?;
    let c_flag = col("analysis_flag")?;
    let c_instrument = col("analysis_instrument")?;
    let c_latitude = col("sample_latitude")?;
    let c_longitude = col("sample_longitude")?;
    let c_elevation = col("sample_elevation")?;
    let c_intake = col("sample_intake_height")?;

    let contact_names = headers.get("contact_name").cloned().unwrap_or_default();
    let contact_emails = headers.get("contact_email").cloned().unwrap_or_default();
    if contact_names.len() != contact_emails.len() {
        return Err(ConvertError::MalformedHeader(
            "contact_name / contact_email counts differ".into(),
        ));
    }
    let contacts: Vec<Contact> = contact_names
        .iter()
        .zip(&contact_emails)
        .map(|(name, email)| Contact {
            name: name.to_string(),
            email: email.to_string(),
        })
        .collect();

    let mut file: Option<FlaskFile> = None;
    let mut bins: Vec<SampleBin> = Vec::new();

    for (idx, raw) in lines.iter().enumerate().skip(header_lines) {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() != columns.len() {
            return Err(ConvertError::MalformedRow {
                line,
                reason: format!("{} columns expected, {} found", columns.len(), tokens.len()),
            });
        }

        let time = Utc
            .with_ymd_and_hms(
                parse_num::<i32>(tokens[c_year], line)?,
                parse_num::<u32>(tokens[c_month], line)?,
                parse_num::<u32>(tokens[c_day], line)?,
                parse_num::<u32>(tokens[c_hour], line)?,
                parse_num::<u32>(tokens[c_minute], line)?,
                parse_num::<u32>(tokens[c_seconds], line)?,
            )
            .single()
            .ok_or_else(|| ConvertError::MalformedRow {
                line,
                reason: "invalid sample date/time".into(),
            })?;

        let value = parse_value(tokens[c_value], line)?;

        let row = FlaskRow {
            line,
            time,
            value,
            flag: tokens[c_flag].to_string(),
        };

        let latitude = parse_num::<f64>(tokens[c_latitude], line)?;
        let longitude = parse_num::<f64>(tokens[c_longitude], line)?;
        let elevation = parse_num::<f64>(tokens[c_elevation], line)?;
        let intake_height = parse_num::<f64>(tokens[c_intake], line)?;

        match &file {
            None => {
                file = Some(FlaskFile {
                    site_code: tokens[c_site].to_string(),
                    latitude,
                    longitude,
                    elevation,
                    intake_height,
                    parameter: tokens[c_parameter].to_string(),
                    analysis_group: tokens[c_group].to_string(),
                    analysis_instrument: tokens[c_instrument].to_string(),
                    contacts: Vec::new(),
                    bins: Vec::new(),
                });
            }
            Some(first) => {
                // a series must be homogeneous; `split` is the remedy
                check_constant("sample_site_code", first.site_code == tokens[c_site])?;
                check_constant("sample_latitude", first.latitude == latitude)?;
                check_constant("sample_longitude", first.longitude == longitude)?;
                check_constant("sample_elevation", first.elevation == elevation)?;
                check_constant("sample_intake_height", first.intake_height == intake_height)?;
                check_constant("parameter_formula", first.parameter == tokens[c_parameter])?;
                check_constant("analysis_group_abbr", first.analysis_group == tokens[c_group])?;
                check_constant(
                    "analysis_instrument",
                    first.analysis_instrument == tokens[c_instrument],
                )?;
            }
        }

        // rows sharing a timestamp are adjacent in NOAA files
        match bins.last_mut() {
            Some(bin) if bin.time == row.time => bin.rows.push(row),
            _ => bins.push(SampleBin {
                time: row.time,
                rows: vec![row],
            }),
        }
    }

    let mut file = file.ok_or_else(|| ConvertError::MalformedHeader("no data rows".into()))?;
    file.contacts = contacts;
    file.bins = bins;
    Ok(file)
}

fn check_constant(field: &'static str, ok: bool) -> Result<(), ConvertError> {
    if ok {
        Ok(())
    } else {
        Err(ConvertError::InconsistentSeries { field })
    }
}

fn parse_num<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, ConvertError> {
    token.parse().map_err(|_| ConvertError::MalformedRow {
        line,
        reason: format!("bad numeric field '{}'", token),
    })
}

/// Parses an `analysis_value` token; missing-value sentinels become `None`.
fn parse_value(token: &str, line: usize) -> Result<Option<f64>, ConvertError> {
    let v: f64 = parse_num(token, line)?;
    if (v - VALUE_MISSING).abs() < 1e-6 || v <= -999.0 {
        Ok(None)
    } else {
        Ok(Some(v))
    }
}
