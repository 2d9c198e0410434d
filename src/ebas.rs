//! Minimal EBAS NASA-Ames 1001 file model and writer.
//!
//! This is deliberately not a general EBAS I/O implementation. It models
//! exactly what the converters produce: one file per station / analytical
//! method / sample-time grid, with three data columns (mean, stddev,
//! sample count) per converted series plus a numflag column each.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use tracing::info;

use crate::error::ConvertError;
use crate::metadata::{Analytical, Organization, Person, Station};

/// File-global metadata of one output file.
#[derive(Debug)]
pub struct FileMetadata {
    pub station: &'static Station,
    pub analytical: &'static Analytical,
    /// Position and intake height as reported in the input data.
    pub mea_latitude: f64,
    pub mea_longitude: f64,
    pub mea_altitude: f64,
    pub mea_height: f64,
    pub originators: &'static [&'static Person],
    pub org: &'static Organization,
    pub submitters: Vec<&'static Person>,
    pub projects: &'static [&'static str],
    pub data_level: &'static str,
    pub revision: String,
    pub period_code: String,
    pub duration_code: &'static str,
    pub resolution_code: &'static str,
    /// Zero point of the file's time axes.
    pub reference_date: DateTime<Utc>,
    pub lab_code: &'static str,
    pub instr_type: &'static str,
    pub instr_name: String,
}

/// Per-variable metadata.
#[derive(Debug, Clone)]
pub struct VariableMetadata {
    pub regime: &'static str,
    pub matrix: &'static str,
    pub comp_name: &'static str,
    pub unit: &'static str,
    pub statistics: &'static str,
}

/// One data column with its per-sample flag lists.
#[derive(Debug)]
pub struct Variable {
    pub metadata: VariableMetadata,
    pub values: Vec<Option<f64>>,
    pub flags: Vec<Vec<u16>>,
    /// Decimal digits used when formatting values and the missing code.
    pub rounding: i32,
}

/// One EBAS NASA-Ames output file under construction.
#[derive(Debug)]
pub struct EbasNasaAmes {
    pub metadata: FileMetadata,
    pub sample_times: Vec<(DateTime<Utc>, DateTime<Utc>)>,
    pub variables: Vec<Variable>,
}

/// Packs EBAS flag codes into one numflag column value: `0.` followed by
/// the codes in ascending order, three digits each. No flags is `0.000`.
pub fn format_flags(flags: &[u16]) -> String {
    if flags.is_empty() {
        return "0.000".to_string();
    }
    let mut sorted: Vec<u16> = flags.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let mut out = String::from("0.");
    for flag in sorted {
        let _ = write!(out, "{:03}", flag);
    }
    out
}

/// Estimates the EBAS period code from the covered time span.
pub fn estimate_period_code(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let days = (end - start).num_seconds() as f64 / 86400.0;
    if days >= 365.0 {
        format!("{}y", (days / 365.25).round().max(1.0) as u32)
    } else if days >= 28.0 {
        format!("{}mo", (days / 30.44).round().max(1.0) as u32)
    } else if days >= 7.0 {
        format!("{}w", (days / 7.0).round() as u32)
    } else if days >= 1.0 {
        format!("{}d", days.round() as u32)
    } else if days * 24.0 >= 1.0 {
        format!("{}h", (days * 24.0).round() as u32)
    } else {
        format!("{}mn", (days * 1440.0).round().max(1.0) as u32)
    }
}

impl Variable {
    /// Missing representation: all 9s, one digit wider than the widest
    /// value, with the variable's decimal precision.
    fn missing_repr(&self) -> String {
        let prec = self.rounding.max(0) as usize;
        let int_digits = self
            .values
            .iter()
            .flatten()
            .map(|v| format!("{:.0}", v.abs()).len())
            .max()
            .unwrap_or(1)
            + 1;
        let mut s = "9".repeat(int_digits);
        if prec > 0 {
            s.push('.');
            s.push_str(&"9".repeat(prec));
        }
        s
    }

    fn format_value(&self, index: usize) -> String {
        match self.values[index] {
            Some(v) => format!("{:.*}", self.rounding.max(0) as usize, v),
            None => self.missing_repr(),
        }
    }
}

impl EbasNasaAmes {
    /// Output file name, derived from station, first sample start, the
    /// revision date and the first variable's component.
    pub fn file_name(&self, revdate: DateTime<Utc>) -> String {
        let start = self.sample_times[0].0;
        let comp = self
            .variables
            .first()
            .map(|v| v.metadata.comp_name)
            .unwrap_or("none");
        format!(
            "{}.{}.{}.{}.nas",
            self.metadata.station.station_code,
            start.format("%Y%m%d%H%M%S"),
            revdate.format("%Y%m%d%H%M%S"),
            comp
        )
    }

    /// Fractional days since the file reference date, 6 decimals.
    fn axis_value(&self, time: DateTime<Utc>) -> String {
        let seconds = (time - self.metadata.reference_date).num_seconds() as f64;
        format!("{:.6}", seconds / 86400.0)
    }

    /// Renders the complete NASA-Ames 1001 file.
    pub fn render(&self, revdate: DateTime<Utc>) -> String {
        let m = &self.metadata;

        let originators = m
            .originators
            .iter()
            .map(|p| format!("{}, {}", p.last_name, p.first_name))
            .collect::<Vec<_>>()
            .join("; ");
        let submitters = m
            .submitters
            .iter()
            .map(|p| format!("{}, {}", p.last_name, p.first_name))
            .collect::<Vec<_>>()
            .join("; ");

        // one value column and one numflag column per variable, plus the
        // end-time axis
        let nv = 1 + 2 * self.variables.len();

        let mut header: Vec<String> = Vec::new();
        header.push(originators);
        header.push(format!(
            "{}, {}, {}, {}, {}, {}, {}, {}",
            m.org.code,
            m.org.name,
            m.org.acronym,
            m.org.unit,
            m.org.addr_line1,
            m.org.addr_zip,
            m.org.addr_city,
            m.org.addr_country
        ));
        header.push(submitters);
        header.push(m.projects.join(" "));
        header.push("1 1".to_string());
        header.push(format!(
            "{} {}",
            m.reference_date.format("%Y %m %d"),
            revdate.format("%Y %m %d")
        ));
        header.push("0".to_string());
        header.push("days from file reference point".to_string());
        header.push(nv.to_string());
        header.push(vec!["1"; nv].join(" "));

        let mut vmiss: Vec<String> = vec!["9999.999999".to_string()];
        let mut vnames: Vec<String> =
            vec!["end_time of measurement, days from the file reference point".to_string()];
        for var in &self.variables {
            vmiss.push(var.missing_repr());
            vmiss.push("9.999999999".to_string());
            vnames.push(format!(
                "{}, {}, Statistics={}",
                var.metadata.comp_name, var.metadata.unit, var.metadata.statistics
            ));
            vnames.push(format!("numflag {}, no unit", var.metadata.comp_name));
        }
        header.push(vmiss.join(" "));
        header.extend(vnames);
        header.push("0".to_string());

        let mut comments: Vec<String> = Vec::new();
        comments.push("Data definition: EBAS_1.1".to_string());
        comments.push(format!("Data level: {}", m.data_level));
        comments.push(format!("Period code: {}", m.period_code));
        comments.push(format!("Resolution code: {}", m.resolution_code));
        comments.push(format!("Sample duration: {}", m.duration_code));
        comments.push(format!("Station code: {}", m.station.station_code));
        comments.push(format!("Platform code: {}", m.station.platform_code));
        comments.push(format!("Station name: {}", m.station.station_name));
        comments.push(format!("Station GAW-ID: {}", m.station.gaw_id));
        comments.push(format!("Station GAW-Name: {}", m.station.gaw_name));
        if let Some(wdca_id) = m.station.wdca_id {
            comments.push(format!("Station WDCA-ID: {}", wdca_id));
        }
        comments.push(format!("Station land use: {}", m.station.landuse));
        comments.push(format!("Station setting: {}", m.station.setting));
        comments.push(format!("Station GAW type: {}", m.station.gaw_type));
        comments.push(format!("Station WMO region: {}", m.station.wmo_region));
        comments.push(format!("Station latitude: {}", m.station.latitude));
        comments.push(format!("Station longitude: {}", m.station.longitude));
        comments.push(format!("Station altitude: {} m", m.station.altitude));
        comments.push(format!("Measurement latitude: {}", m.mea_latitude));
        comments.push(format!("Measurement longitude: {}", m.mea_longitude));
        comments.push(format!("Measurement altitude: {} m", m.mea_altitude));
        comments.push(format!("Measurement height: {} m", m.mea_height));
        comments.push(format!("Laboratory code: {}", m.lab_code));
        comments.push(format!("Instrument type: {}", m.instr_type));
        comments.push(format!("Instrument name: {}", m.instr_name));
        comments.push(format!(
            "Analytical measurement technique: {}",
            m.analytical.technique
        ));
        comments.push(format!(
            "Analytical instrument manufacturer: {}",
            m.analytical.manufacturer
        ));
        comments.push(format!(
            "Analytical instrument model: {}",
            m.analytical.model
        ));
        comments.push("Timezone: UTC".to_string());
        comments.push(format!("Revision: {}", m.revision));
        comments.push(format!("Revision date: {}", revdate.format("%Y%m%d%H%M%S")));
        let mut title = "starttime endtime".to_string();
        for var in &self.variables {
            let _ = write!(title, " {} flag", var.metadata.comp_name);
        }
        comments.push(title);
        header.push(comments.len().to_string());
        header.extend(comments);

        // NLHEAD counts itself
        let nlhead = header.len() + 1;
        let mut out = format!("{} 1001\n", nlhead);
        for line in header {
            out.push_str(&line);
            out.push('\n');
        }

        for (i, (start, end)) in self.sample_times.iter().enumerate() {
            let mut line = format!("{} {}", self.axis_value(*start), self.axis_value(*end));
            for var in &self.variables {
                let _ = write!(
                    line,
                    " {} {}",
                    var.format_value(i),
                    format_flags(&var.flags[i])
                );
            }
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// Collects output files during a run and writes them all at the end.
///
/// Data from one station with the same analytical metadata and the same
/// sample intervals is merged into one file; everything else opens a new
/// file.
#[derive(Debug, Default)]
pub struct OutputRegistry {
    files: Vec<EbasNasaAmes>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Finds an open file the given series fits into.
    pub fn find_mut(
        &mut self,
        station: &Station,
        analytical: &Analytical,
        sample_times: &[(DateTime<Utc>, DateTime<Utc>)],
    ) -> Option<&mut EbasNasaAmes> {
        self.files.iter_mut().find(|f| {
            f.metadata.station.station_code == station.station_code
                && f.metadata.analytical.technique == analytical.technique
                && f.metadata.analytical.lab_code == analytical.lab_code
                && f.metadata.analytical.instr_name == analytical.instr_name
                && f.sample_times == sample_times
        })
    }

    /// Registers a completed new file. Callers must only register after
    /// the first variable set converted cleanly, so failed conversions
    /// never leave empty files behind.
    pub fn register(&mut self, file: EbasNasaAmes) {
        self.files.push(file);
    }

    /// Writes every registered file into `dir` with the given revision
    /// date. Returns the written paths.
    pub fn write_all(
        &self,
        dir: &Path,
        revdate: DateTime<Utc>,
    ) -> Result<Vec<PathBuf>, ConvertError> {
        fs::create_dir_all(dir)?;
        let mut paths = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = dir.join(file.file_name(revdate));
            fs::write(&path, file.render(revdate))?;
            info!("wrote {}", path.display());
            paths.push(path);
        }
        Ok(paths)
    }
}

/// File reference date: Jan 1st of the year of the first sample end time.
pub fn reference_date(sample_times: &[(DateTime<Utc>, DateTime<Utc>)]) -> DateTime<Utc> {
    use chrono::TimeZone;
    let year = sample_times[0].1.year();
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{DATA_ORIGINATOR_ORG, ORIGINATORS, resolve_analytical, resolve_station};
    use chrono::TimeZone;

    static PROJECTS: &[&str] = &["GAW-WDCRG", "NOAA-GGGRN"];

    fn sample_times(weeks: usize) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        (0..weeks)
            .map(|i| {
                let start = Utc.with_ymd_and_hms(2020, 1, 7, 11, 30, 0).unwrap()
                    + chrono::Duration::weeks(i as i64);
                (start, start + chrono::Duration::minutes(1))
            })
            .collect()
    }

    fn test_file() -> EbasNasaAmes {
        let station = resolve_station("ZEP", 78.90715, 11.88668, 474.0).unwrap();
        let analytical = resolve_analytical("ARL", "v1").unwrap();
        let times = sample_times(3);
        EbasNasaAmes {
            metadata: FileMetadata {
                station,
                analytical,
                mea_latitude: 78.90715,
                mea_longitude: 11.88668,
                mea_altitude: 474.0,
                mea_height: 5.0,
                originators: ORIGINATORS,
                org: &DATA_ORIGINATOR_ORG,
                submitters: vec![ORIGINATORS[0]],
                projects: PROJECTS,
                data_level: "2",
                revision: "1".to_string(),
                period_code: estimate_period_code(times[0].0, times[times.len() - 1].1),
                duration_code: "1mn",
                resolution_code: "1w",
                reference_date: reference_date(&times),
                lab_code: "US13L",
                instr_type: "glass_flask",
                instr_name: format!("glass_flask_{}", station.station_code),
            },
            sample_times: times,
            variables: vec![Variable {
                metadata: VariableMetadata {
                    regime: "IMG",
                    matrix: "air",
                    comp_name: "ethane",
                    unit: "pmol/mol",
                    statistics: "arithmetic mean",
                },
                values: vec![Some(1529.3), None, Some(87.2)],
                flags: vec![vec![], vec![999], vec![660, 559]],
                rounding: 1,
            }],
        }
    }

    #[test]
    fn test_format_flags() {
        assert_eq!(format_flags(&[]), "0.000");
        assert_eq!(format_flags(&[999]), "0.999");
        // codes are sorted ascending and deduplicated
        assert_eq!(format_flags(&[660, 559, 660]), "0.559660");
    }

    #[test]
    fn test_estimate_period_code() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            estimate_period_code(start, start + chrono::Duration::days(730)),
            "2y"
        );
        assert_eq!(
            estimate_period_code(start, start + chrono::Duration::days(60)),
            "2mo"
        );
        assert_eq!(
            estimate_period_code(start, start + chrono::Duration::days(14)),
            "2w"
        );
        assert_eq!(
            estimate_period_code(start, start + chrono::Duration::minutes(1)),
            "1mn"
        );
    }

    #[test]
    fn test_reference_date_is_jan_first() {
        let times = sample_times(2);
        assert_eq!(
            reference_date(&times),
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_repr_follows_precision() {
        let file = test_file();
        // widest value has 4 integer digits, precision 1
        assert_eq!(file.variables[0].missing_repr(), "99999.9");
        assert_eq!(file.variables[0].format_value(1), "99999.9");
        assert_eq!(file.variables[0].format_value(0), "1529.3");
    }

    #[test]
    fn test_file_name() {
        let file = test_file();
        let revdate = Utc.with_ymd_and_hms(2021, 5, 27, 12, 0, 0).unwrap();
        assert_eq!(
            file.file_name(revdate),
            "NO0042G.20200107113000.20210527120000.ethane.nas"
        );
    }

    #[test]
    fn test_render_structure() {
        let file = test_file();
        let revdate = Utc.with_ymd_and_hms(2021, 5, 27, 12, 0, 0).unwrap();
        let text = file.render(revdate);
        let lines: Vec<&str> = text.lines().collect();

        // first line declares the header length and FFI 1001
        let nlhead: usize = lines[0].split_whitespace().next().unwrap().parse().unwrap();
        assert!(lines[0].ends_with("1001"));
        assert_eq!(lines.len(), nlhead + file.sample_times.len());

        // one data line per sample, start end value flag
        let data = lines[nlhead];
        let fields: Vec<&str> = data.split_whitespace().collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[2], "1529.3");
        assert_eq!(fields[3], "0.000");

        let missing = lines[nlhead + 1];
        assert!(missing.ends_with("99999.9 0.999"));

        assert!(text.contains("Station code: NO0042G"));
        assert!(text.contains("Sample duration: 1mn"));
    }

    #[test]
    fn test_registry_merges_matching_series() {
        let mut registry = OutputRegistry::new();
        let file = test_file();
        let station = file.metadata.station;
        let analytical = file.metadata.analytical;
        let times = file.sample_times.clone();
        registry.register(file);

        assert!(registry.find_mut(station, analytical, &times).is_some());
        // a different time grid opens a new file
        assert!(registry.find_mut(station, analytical, &sample_times(5)).is_none());
        assert_eq!(registry.len(), 1);
    }
}
