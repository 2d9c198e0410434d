//! Static lookup tables mapping NOAA network identifiers to the EBAS
//! controlled vocabulary, plus physical-consistency validation.
//!
//! Extending coverage requires a code change; that is an accepted
//! operational limitation of these converters, not a bug.

use std::f64::consts::PI;

use crate::error::ConvertError;

/// Maximum great-circle distance between reported and canonical station
/// position, in meters.
pub const MAX_POSITION_DISTANCE_M: f64 = 3000.0;
/// Maximum difference between reported and canonical elevation, in meters.
pub const MAX_ELEVATION_DIFFERENCE_M: f64 = 20.0;

/// Canonical EBAS/GAW station record.
#[derive(Debug, PartialEq)]
pub struct Station {
    pub gaw_id: &'static str,
    pub station_code: &'static str,
    pub platform_code: &'static str,
    pub station_name: &'static str,
    pub wdca_id: Option<&'static str>,
    pub gaw_name: &'static str,
    pub landuse: &'static str,
    pub setting: &'static str,
    pub gaw_type: &'static str,
    pub wmo_region: u8,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Chemical/physical parameter record.
#[derive(Debug, PartialEq)]
pub struct Parameter {
    pub formula: &'static str,
    pub regime: &'static str,
    pub matrix: &'static str,
    pub comp_name: &'static str,
    pub unit: &'static str,
    /// Detection limit in the parameter's unit.
    pub detection_limit: f64,
}

/// A person record (data originator or submitter).
#[derive(Debug, PartialEq)]
pub struct Person {
    pub last_name: &'static str,
    pub first_name: &'static str,
    pub email: &'static str,
    pub org_name: &'static str,
    pub org_acronym: &'static str,
    pub org_unit: &'static str,
    pub addr_line1: &'static str,
    pub addr_zip: &'static str,
    pub addr_city: &'static str,
    pub addr_country: &'static str,
    pub orcid: Option<&'static str>,
}

/// Analytical method record, keyed by (analysis group, instrument version).
#[derive(Debug, PartialEq)]
pub struct Analytical {
    pub group: &'static str,
    pub instrument: &'static str,
    pub technique: &'static str,
    pub lab_code: &'static str,
    pub instr_name: &'static str,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub serial_no: Option<&'static str>,
}

/// Data originator organisation.
#[derive(Debug, PartialEq)]
pub struct Organization {
    pub code: &'static str,
    pub name: &'static str,
    pub acronym: &'static str,
    pub unit: &'static str,
    pub addr_line1: &'static str,
    pub addr_zip: &'static str,
    pub addr_city: &'static str,
    pub addr_country: &'static str,
}

pub static STATIONS: &[Station] = &[
    Station {
        gaw_id: "ABP",
        station_code: "BR0002G",
        platform_code: "BR0002S",
        station_name: "Arembepe",
        wdca_id: Some("GAWABR__ABP"),
        gaw_name: "Arembepe",
        landuse: "Residential",
        setting: "Coastal",
        gaw_type: "G",
        wmo_region: 3,
        latitude: -12.7666667,
        longitude: -38.1666667,
        altitude: 10.0,
    },
    Station {
        gaw_id: "ALT",
        station_code: "CA0420G",
        platform_code: "CA0420S",
        station_name: "Alert",
        wdca_id: Some("GAWACANUALT"),
        gaw_name: "Alert",
        landuse: "Military reservation",
        setting: "Polar",
        gaw_type: "G",
        wmo_region: 4,
        latitude: 82.499146,
        longitude: -62.341526,
        altitude: 210.0,
    },
    Station {
        gaw_id: "AMT",
        station_code: "US0132R",
        platform_code: "US0132S",
        station_name: "Argyle",
        wdca_id: Some("GAWAUSMEAMT"),
        gaw_name: "Argyle",
        landuse: "Forest",
        setting: "Rural",
        gaw_type: "O",
        wmo_region: 4,
        latitude: 45.0299987793,
        longitude: -68.6800003052,
        altitude: 50.0,
    },
    Station {
        gaw_id: "AMY",
        station_code: "KR0100R",
        platform_code: "KR0100S",
        station_name: "Anmyeon-do",
        wdca_id: Some("GAWAKR__AMY"),
        gaw_name: "Anmyeon-do",
        landuse: "Agricultural",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 2,
        latitude: 36.538334,
        longitude: 126.330002,
        altitude: 46.0,
    },
    Station {
        gaw_id: "ASC",
        station_code: "SH0001R",
        platform_code: "SH0001S",
        station_name: "Ascension Island",
        wdca_id: Some("GAWASH__ASC"),
        gaw_name: "Ascension Island",
        landuse: "Gravel and stone",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 1,
        latitude: -7.966667,
        longitude: -14.4,
        altitude: 80.0,
    },
    Station {
        gaw_id: "ASK",
        station_code: "DZ0001G",
        platform_code: "DZ0001S",
        station_name: "Assekrem",
        wdca_id: Some("GAWADA__ASK"),
        gaw_name: "Assekrem",
        landuse: "Desert",
        setting: "Mountain",
        gaw_type: "G",
        wmo_region: 1,
        latitude: 23.26667,
        longitude: 5.63333,
        altitude: 2710.0,
    },
    Station {
        gaw_id: "AZR",
        station_code: "PT0015R",
        platform_code: "PT0015S",
        station_name: "Serreta (Terceira)",
        wdca_id: Some("GAWAPT__AZR"),
        gaw_name: "Serreta (Terceira)",
        landuse: "Forest",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 6,
        latitude: 38.7700004578,
        longitude: -27.3799991608,
        altitude: 40.0,
    },
    Station {
        gaw_id: "BAL",
        station_code: "PL0011R",
        platform_code: "PL0011M",
        station_name: "Baltic Sea",
        wdca_id: None,
        gaw_name: "Baltic Sea",
        landuse: "Other",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 6,
        latitude: 55.35,
        longitude: 17.21,
        altitude: 3.0,
    },
    Station {
        gaw_id: "BKT",
        station_code: "ID1013R",
        platform_code: "ID1013S",
        station_name: "Bukit Kototabang",
        wdca_id: Some("GAWAID__BKT"),
        gaw_name: "Bukit Kototabang",
        landuse: "Forest",
        setting: "Mountain",
        gaw_type: "G",
        wmo_region: 5,
        latitude: -0.20194,
        longitude: 100.3181,
        altitude: 864.0,
    },
    Station {
        gaw_id: "USH",
        station_code: "AR0002G",
        platform_code: "AR0002S",
        station_name: "Ushuaia",
        wdca_id: Some("GAWAAR__USH"),
        gaw_name: "Ushuaia",
        landuse: "Airport",
        setting: "Coastal",
        gaw_type: "G",
        wmo_region: 3,
        latitude: -54.848464965799998,
        longitude: -68.310691833500002,
        altitude: 18.0,
    },
    Station {
        gaw_id: "CGO",
        station_code: "AU0002G",
        platform_code: "AU0002S",
        station_name: "Cape Grim",
        wdca_id: Some("GAWAMX__CGO"),
        gaw_name: "Cape Grim",
        landuse: "Grassland",
        setting: "Coastal",
        gaw_type: "G",
        wmo_region: 5,
        latitude: -40.68222,
        longitude: 144.68834,
        altitude: 94.0,
    },
    Station {
        gaw_id: "RPB",
        station_code: "BB0001R",
        platform_code: "BB0001S",
        station_name: "Ragged Point",
        wdca_id: Some("GAWABB__RPB"),
        gaw_name: "Ragged Point",
        landuse: "Residential",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 4,
        latitude: 13.165,
        longitude: -59.432,
        altitude: 15.0,
    },
    Station {
        gaw_id: "BMW",
        station_code: "BM0001R",
        platform_code: "BM0001S",
        station_name: "Tudor Hill (Bermuda)",
        wdca_id: Some("GAWAGB__BMW"),
        gaw_name: "Tudor Hill (Bermuda)",
        landuse: "Residential",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 4,
        latitude: 32.2647,
        longitude: -64.8788,
        altitude: 30.0,
    },
    Station {
        gaw_id: "NAT",
        station_code: "BR0003U",
        platform_code: "BR0003S",
        station_name: "Natal",
        wdca_id: Some("GAWABR__NAT"),
        gaw_name: "Natal",
        landuse: "Residential",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 3,
        latitude: -5.7952,
        longitude: -35.1853,
        altitude: 50.0,
    },
    Station {
        gaw_id: "LLB",
        station_code: "CA0108R",
        platform_code: "CA0108S",
        station_name: "Lac La Biche (Alberta)",
        wdca_id: Some("GAWACAALLLB"),
        gaw_name: "Lac La Biche (Alberta)",
        landuse: "Forest",
        setting: "Rural",
        gaw_type: "R",
        wmo_region: 4,
        latitude: 54.953809,
        longitude: -112.466649,
        altitude: 548.0,
    },
    Station {
        gaw_id: "EIC",
        station_code: "CL0002R",
        platform_code: "CL0002S",
        station_name: "Easter Island",
        wdca_id: Some("GAWAMX__EIC"),
        gaw_name: "Easter Island",
        landuse: "Airport",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 3,
        latitude: -27.1597,
        longitude: -109.4284,
        altitude: 47.0,
    },
    Station {
        gaw_id: "HPB",
        station_code: "DE0043G",
        platform_code: "DE0043S",
        station_name: "Hohenpeissenberg",
        wdca_id: Some("GAWADE__HPB"),
        gaw_name: "Hohenpeissenberg",
        landuse: "Grassland",
        setting: "Mountain",
        gaw_type: "G",
        wmo_region: 6,
        latitude: 47.801498413099999,
        longitude: 11.009619,
        altitude: 975.0,
    },
    Station {
        gaw_id: "OXK",
        station_code: "DE0076R",
        platform_code: "DE0076S",
        station_name: "Ochsenkopf",
        wdca_id: Some("GAWADE__OXK"),
        gaw_name: "Ochsenkopf",
        landuse: "Forest",
        setting: "Mountain",
        gaw_type: "C",
        wmo_region: 6,
        latitude: 50.0301,
        longitude: 11.8084,
        altitude: 1020.0,
    },
    Station {
        gaw_id: "SUM",
        station_code: "DK0025G",
        platform_code: "DK0025S",
        station_name: "Summit",
        wdca_id: Some("GAWADK__SUM"),
        gaw_name: "Summit",
        landuse: "Snowfield",
        setting: "Polar",
        gaw_type: "G",
        wmo_region: 6,
        latitude: 72.580001831100006,
        longitude: -38.479999542199998,
        altitude: 3238.0,
    },
    Station {
        gaw_id: "IZO",
        station_code: "ES0018G",
        platform_code: "ES0018S",
        station_name: "Izana",
        wdca_id: Some("GAWAES__IZO"),
        gaw_name: "Izaña (Tenerife)",
        landuse: "Gravel and stone",
        setting: "Mountain",
        gaw_type: "G",
        wmo_region: 1,
        latitude: 28.309,
        longitude: -16.4994,
        altitude: 2373.0,
    },
    Station {
        gaw_id: "PAL",
        station_code: "FI0096G",
        platform_code: "FI0096S",
        station_name: "Pallas (Sammaltunturi)",
        wdca_id: Some("GAWAFI__PAL"),
        gaw_name: "Pallas",
        landuse: "Forest",
        setting: "Rural",
        gaw_type: "G",
        wmo_region: 6,
        latitude: 67.973333333,
        longitude: 24.116111111,
        altitude: 565.0,
    },
    Station {
        gaw_id: "CRZ",
        station_code: "FR0040G",
        platform_code: "FR0040S",
        station_name: "Crozet",
        wdca_id: Some("GAWAMX__CRZ"),
        gaw_name: "Crozet",
        landuse: "Gravel and stone",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 1,
        latitude: -46.432487,
        longitude: 51.857776,
        altitude: 120.0,
    },
    Station {
        gaw_id: "HBA",
        station_code: "GB0059G",
        platform_code: "GB0059S",
        station_name: "Halley",
        wdca_id: Some("GAWAGB__HBA"),
        gaw_name: "Halley",
        landuse: "Snowfield",
        setting: "Polar",
        gaw_type: "G",
        wmo_region: 7,
        latitude: -75.605,
        longitude: -26.21,
        altitude: 30.0,
    },
    Station {
        gaw_id: "MHD",
        station_code: "IE0031R",
        platform_code: "IE0031S",
        station_name: "Mace Head",
        wdca_id: Some("GAWAIE__MHD"),
        gaw_name: "Mace Head",
        landuse: "Grassland",
        setting: "Coastal",
        gaw_type: "G",
        wmo_region: 6,
        latitude: 53.32583,
        longitude: -9.89944,
        altitude: 5.0,
    },
    Station {
        gaw_id: "ICE",
        station_code: "IS0091R",
        platform_code: "IS0091S",
        station_name: "Storhofdi",
        wdca_id: Some("GAWAIS__ICE"),
        gaw_name: "Storhofdi",
        landuse: "Grassland",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 6,
        latitude: 63.3998,
        longitude: -20.2884,
        altitude: 118.0,
    },
    Station {
        gaw_id: "SYO",
        station_code: "JP0002G",
        platform_code: "JP0002S",
        station_name: "Syowa",
        wdca_id: Some("GAWAJP__SYO"),
        gaw_name: "Syowa",
        landuse: "Snowfield",
        setting: "Polar",
        gaw_type: "R",
        wmo_region: 7,
        latitude: -69.005,
        longitude: 39.590555556,
        altitude: 16.0,
    },
    Station {
        gaw_id: "MKN",
        station_code: "KE0001G",
        platform_code: "KE0001S",
        station_name: "Mt. Kenya",
        wdca_id: Some("GAWAKE__MKN"),
        gaw_name: "Mt. Kenya",
        landuse: "Grassland",
        setting: "Mountain",
        gaw_type: "G",
        wmo_region: 1,
        latitude: -0.0622,
        longitude: 37.2972,
        altitude: 3678.0,
    },
    Station {
        gaw_id: "TAP",
        station_code: "KR0002R",
        platform_code: "KR0002S",
        station_name: "Tae-ahn Peninsula",
        wdca_id: Some("GAWAKR__TAP"),
        gaw_name: "Tae-ahn Peninsula",
        landuse: "Forest",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 2,
        latitude: 36.736833,
        longitude: 126.132722,
        altitude: 16.0,
    },
    Station {
        gaw_id: "MEX",
        station_code: "MX0001R",
        platform_code: "MX0001S",
        station_name: "High Altitude Global Climate Observation Center",
        wdca_id: Some("GAWAMX__MEX"),
        gaw_name: "Mex High Altitude Global Climate Observation Center",
        landuse: "Gravel and stone",
        setting: "Mountain",
        gaw_type: "O",
        wmo_region: 4,
        latitude: 18.985842,
        longitude: -97.314433,
        altitude: 4560.0,
    },
    Station {
        gaw_id: "BSC",
        station_code: "RO0009U",
        platform_code: "RO0009S",
        station_name: "Constanta (Black Sea)",
        wdca_id: None,
        gaw_name: "Constanta (Black Sea)",
        landuse: "Urban park",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 6,
        latitude: 44.1776,
        longitude: 28.6647,
        altitude: 3.0,
    },
    Station {
        gaw_id: "TIK",
        station_code: "RU0100R",
        platform_code: "RU0100S",
        station_name: "Tiksi",
        wdca_id: Some("GAWARU__TIK"),
        gaw_name: "Tiksi",
        landuse: "Grassland",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 2,
        latitude: 71.586166381799998,
        longitude: 128.9188232422,
        altitude: 8.0,
    },
    Station {
        gaw_id: "SEY",
        station_code: "SC0001R",
        platform_code: "SC0001S",
        station_name: "Mahé",
        wdca_id: Some("GAWASC__SEY"),
        gaw_name: "Mahé",
        landuse: "Airport",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 1,
        latitude: -4.6824,
        longitude: 55.5325,
        altitude: 3.0,
    },
    Station {
        gaw_id: "CBA",
        station_code: "US0133R",
        platform_code: "US0133S",
        station_name: "Cold Bay",
        wdca_id: Some("GAWAUS__CBA"),
        gaw_name: "Cold Bay (AK)",
        landuse: "Airport",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 4,
        latitude: 55.21,
        longitude: -162.72,
        altitude: 25.0,
    },
    Station {
        gaw_id: "GMI",
        station_code: "US0134R",
        platform_code: "US0134S",
        station_name: "Guam (Mariana Island)",
        wdca_id: Some("GAWAUS__GMI"),
        gaw_name: "Guam (Mariana Island)",
        landuse: "Residential",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 5,
        latitude: 13.430338,
        longitude: 144.801051,
        altitude: 2.0,
    },
    Station {
        gaw_id: "KEY",
        station_code: "US0135R",
        platform_code: "US0135S",
        station_name: "Key Biscayne",
        wdca_id: Some("GAWAUSFLKEY"),
        gaw_name: "Key Biscane (FL)",
        landuse: "Urban park",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 4,
        latitude: 25.6654,
        longitude: -80.158,
        altitude: 1.0,
    },
    Station {
        gaw_id: "KUM",
        station_code: "US0136G",
        platform_code: "US0136S",
        station_name: "Cape Kumukahi",
        wdca_id: Some("GAWAUSHIKUM"),
        gaw_name: "Cape Kumukahi (HI)",
        landuse: "Gravel and stone",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 5,
        latitude: 19.516199,
        longitude: -154.810857,
        altitude: 3.0,
    },
    Station {
        gaw_id: "LEF",
        station_code: "US0137R",
        platform_code: "US0137S",
        station_name: "Park Falls",
        wdca_id: Some("GAWAUSWILEF"),
        gaw_name: "Park Falls (WI)",
        landuse: "Forest",
        setting: "Rural",
        gaw_type: "R",
        wmo_region: 4,
        latitude: 45.945099999999996,
        longitude: -90.2732,
        altitude: 472.0,
    },
    Station {
        gaw_id: "MID",
        station_code: "US0138G",
        platform_code: "US0138S",
        station_name: "Sand Island",
        wdca_id: Some("GAWAUS__MID"),
        gaw_name: "Sand Island",
        landuse: "Airport",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 5,
        latitude: 28.21,
        longitude: -177.38,
        altitude: 3.0,
    },
    Station {
        gaw_id: "PSA",
        station_code: "US0139G",
        platform_code: "US0139S",
        station_name: "Palmer Station",
        wdca_id: Some("GAWAUS__PSA"),
        gaw_name: "Palmer Station",
        landuse: "Snowfield",
        setting: "Polar",
        gaw_type: "R",
        wmo_region: 7,
        latitude: -64.774330139200003,
        longitude: -64.054420471200004,
        altitude: 10.0,
    },
    Station {
        gaw_id: "SHM",
        station_code: "US0140G",
        platform_code: "US0140S",
        station_name: "Shemya Island",
        wdca_id: Some("GAWAUSAKSHM"),
        gaw_name: "Shemya Island",
        landuse: "Grassland",
        setting: "Coastal",
        gaw_type: "R",
        wmo_region: 4,
        latitude: 52.7112,
        longitude: 174.126,
        altitude: 23.0,
    },
    Station {
        gaw_id: "UTA",
        station_code: "US0141R",
        platform_code: "US0141S",
        station_name: "Wendover",
        wdca_id: Some("GAWAUSUTUTA"),
        gaw_name: "Wendover (UT)",
        landuse: "Desert",
        setting: "Rural",
        gaw_type: "R",
        wmo_region: 4,
        latitude: 39.9018,
        longitude: -113.7181,
        altitude: 1327.0,
    },
    Station {
        gaw_id: "MLO",
        station_code: "US1200R",
        platform_code: "US1200S",
        station_name: "Mauna Loa",
        wdca_id: Some("GAWAUSHIMLO"),
        gaw_name: "Mauna Loa (HI)",
        landuse: "Gravel and stone",
        setting: "Mountain",
        gaw_type: "G",
        wmo_region: 5,
        latitude: 19.536230087300002,
        longitude: -155.5761566162,
        altitude: 3397.0,
    },
    Station {
        gaw_id: "SMO",
        station_code: "US6001R",
        platform_code: "US6001S",
        station_name: "Samoa (Cape Matatula)",
        wdca_id: Some("GAWAUS__SMO"),
        gaw_name: "Samoa (Cape Matatula)",
        landuse: "Residential",
        setting: "Coastal",
        gaw_type: "G",
        wmo_region: 5,
        latitude: -14.2474746704,
        longitude: -170.56451416019999,
        altitude: 77.0,
    },
    Station {
        gaw_id: "SGP",
        station_code: "US6002C",
        platform_code: "US6002S",
        station_name: "Southern Great Plains E13",
        wdca_id: Some("GAWAUSOKSGP"),
        gaw_name: "Southern Great Plains E13 (OK)",
        landuse: "Agricultural",
        setting: "Rural",
        gaw_type: "C",
        wmo_region: 4,
        latitude: 36.605,
        longitude: -97.484999,
        altitude: 318.0,
    },
    Station {
        gaw_id: "SPO",
        station_code: "US6004G",
        platform_code: "US6004S",
        station_name: "South Pole",
        wdca_id: Some("GAWAUS__SPO"),
        gaw_name: "South Pole",
        landuse: "Snowfield",
        setting: "Polar",
        gaw_type: "G",
        wmo_region: 7,
        latitude: -89.996948242200006,
        longitude: -24.7999992371,
        altitude: 2841.0,
    },
    Station {
        gaw_id: "THD",
        station_code: "US6005G",
        platform_code: "US6005S",
        station_name: "Trinidad Head",
        wdca_id: Some("GAWAUSCATHD"),
        gaw_name: "Trinidad Head (CA)",
        landuse: "Residential",
        setting: "Coastal",
        gaw_type: "G",
        wmo_region: 4,
        latitude: 41.054100036599998,
        longitude: -124.1510009766,
        altitude: 107.0,
    },
    Station {
        gaw_id: "CPT",
        station_code: "ZA0001G",
        platform_code: "ZA0001S",
        station_name: "Cape Point",
        wdca_id: Some("GAWAMX__CPT"),
        gaw_name: "Cape Point",
        landuse: "Grassland",
        setting: "Coastal",
        gaw_type: "G",
        wmo_region: 1,
        latitude: -34.35348,
        longitude: 18.48968,
        altitude: 230.0,
    },
    Station {
        gaw_id: "ZEP",
        station_code: "NO0042G",
        platform_code: "NO0042S",
        station_name: "Zeppelin mountain (Ny-Ålesund)",
        wdca_id: Some("GAWANO__ZEP"),
        gaw_name: "Zeppelin Mountain (Ny Ålesund)",
        landuse: "Gravel and stone",
        setting: "Polar",
        gaw_type: "G",
        wmo_region: 6,
        latitude: 78.90715,
        longitude: 11.88668,
        altitude: 474.0,
    },
    Station {
        gaw_id: "BRW",
        station_code: "US0008R",
        platform_code: "US0008S",
        station_name: "Barrow",
        wdca_id: Some("GAWAUSAKBRW"),
        gaw_name: "Barrow (AK)",
        landuse: "Wetland",
        setting: "Polar",
        gaw_type: "G",
        wmo_region: 4,
        latitude: 71.323013,
        longitude: -156.611465,
        altitude: 11.0,
    },
];

pub static PARAMETERS: &[Parameter] = &[
    Parameter {
        formula: "C2H6",
        regime: "IMG",
        matrix: "air",
        comp_name: "ethane",
        unit: "pmol/mol",
        detection_limit: 5.0,
    },
    Parameter {
        formula: "C3H8",
        regime: "IMG",
        matrix: "air",
        comp_name: "propane",
        unit: "pmol/mol",
        detection_limit: 4.0,
    },
    // isoprene (C5H8) is deliberately not converted until its QA is finished
    Parameter {
        formula: "nC4H10",
        regime: "IMG",
        matrix: "air",
        comp_name: "n-butane",
        unit: "pmol/mol",
        detection_limit: 3.0,
    },
    Parameter {
        formula: "iC4H10",
        regime: "IMG",
        matrix: "air",
        comp_name: "2-methylpropane",
        unit: "pmol/mol",
        detection_limit: 3.0,
    },
    Parameter {
        formula: "nC5H12",
        regime: "IMG",
        matrix: "air",
        comp_name: "n-pentane",
        unit: "pmol/mol",
        detection_limit: 2.0,
    },
    Parameter {
        formula: "iC5H12",
        regime: "IMG",
        matrix: "air",
        comp_name: "2-methylbutane",
        unit: "pmol/mol",
        detection_limit: 2.0,
    },
];

static HELMIG: Person = Person {
    last_name: "Helmig",
    first_name: "Detlev",
    email: "Detlev.Helmig@colorado.edu",
    org_name: "University of Colorado - INSTAAR",
    org_acronym: "INSTAAR",
    org_unit: "Institute of Arctic and Alpine Research",
    addr_line1: "4001 Discovery Drive",
    addr_zip: "CO 80303",
    addr_city: "Boulder",
    addr_country: "USA",
    orcid: Some("0000-0003-1612-1651"),
};

static MUND: Person = Person {
    last_name: "Mund",
    first_name: "John",
    email: "John.Mund@noaa.gov",
    org_name: "National Oceanic and Atmospheric Administration",
    org_acronym: "NOAA GML",
    org_unit: "Global Monitoring Laboratory",
    addr_line1: "325 Broadway R/GML",
    addr_zip: "80305-3328",
    addr_city: "Boulder",
    addr_country: "USA",
    orcid: None,
};

/// Known submitters, keyed by the (name, email) pair from the file header.
pub static SUBMITTERS: &[(&str, &str, &Person)] = &[
    ("Detlev Helmig", "Detlev.Helmig@colorado.edu", &HELMIG),
    ("John Mund", "John.Mund@noaa.gov", &MUND),
];

/// Data originators (PIs) for the NOAA flask NMHC datasets.
pub static ORIGINATORS: &[&Person] = &[&HELMIG];

pub static ANALYTICAL: &[Analytical] = &[Analytical {
    group: "ARL",
    instrument: "v1",
    technique: "GC-FID",
    lab_code: "US13L",
    instr_name: "GC_FID_v1",
    manufacturer: "Hewlett Packard",
    model: "HP-5890 series II",
    serial_no: None,
}];

pub static DATA_ORIGINATOR_ORG: Organization = Organization {
    code: "US06L",
    name: "National Oceanic and Atmospheric Administration",
    acronym: "NOAA/ESRL/GMD",
    unit: "Earth System Research Laboratory, Global Monitoring Division",
    addr_line1: "325 Broadway",
    addr_zip: "CO 80305-3",
    addr_city: "Boulder",
    addr_country: "U.S.A.",
};

/// Haversine great-circle distance in meters, spherical earth
/// approximation (1 nautical mile = 1852 m).
pub fn haversine_dist_m(pos1: (f64, f64), pos2: (f64, f64)) -> f64 {
    let r_m = 180.0 * 60.0 / PI * 1852.0;
    let (lat1, lon1) = (pos1.0.to_radians(), pos1.1.to_radians());
    let (lat2, lon2) = (pos2.0.to_radians(), pos2.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * r_m
}

/// Resolves a GAW site code and validates the reported position and
/// elevation against the canonical station record.
pub fn resolve_station(
    site: &str,
    latitude: f64,
    longitude: f64,
    elevation: f64,
) -> Result<&'static Station, ConvertError> {
    let station = STATIONS
        .iter()
        .find(|s| s.gaw_id == site)
        .ok_or_else(|| ConvertError::UndefinedStation(site.to_string()))?;

    let distance_m = haversine_dist_m(
        (station.latitude, station.longitude),
        (latitude, longitude),
    );
    if distance_m > MAX_POSITION_DISTANCE_M {
        return Err(ConvertError::PositionMismatch {
            site: site.to_string(),
            station: station.station_name,
            distance_m,
        });
    }

    let difference_m = (station.altitude - elevation).abs();
    if difference_m > MAX_ELEVATION_DIFFERENCE_M {
        return Err(ConvertError::ElevationMismatch {
            site: site.to_string(),
            station: station.station_name,
            difference_m,
        });
    }

    Ok(station)
}

pub fn resolve_parameter(formula: &str) -> Result<&'static Parameter, ConvertError> {
    PARAMETERS
        .iter()
        .find(|p| p.formula == formula)
        .ok_or_else(|| ConvertError::UndefinedParameter(formula.to_string()))
}

pub fn resolve_analytical(
    group: &str,
    instrument: &str,
) -> Result<&'static Analytical, ConvertError> {
    ANALYTICAL
        .iter()
        .find(|a| a.group == group && a.instrument == instrument)
        .ok_or_else(|| ConvertError::UndefinedMethod {
            group: group.to_string(),
            instrument: instrument.to_string(),
        })
}

pub fn resolve_submitter(name: &str, email: &str) -> Result<&'static Person, ConvertError> {
    SUBMITTERS
        .iter()
        .find(|(n, e, _)| *n == name && *e == email)
        .map(|(_, _, person)| *person)
        .ok_or_else(|| ConvertError::UndefinedSubmitter {
            name: name.to_string(),
            email: email.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_station_is_pure_lookup() {
        let a = resolve_station("ZEP", 78.90715, 11.88668, 474.0).unwrap();
        let b = resolve_station("ZEP", 78.90715, 11.88668, 474.0).unwrap();
        assert_eq!(a.station_code, "NO0042G");
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolve_station_tolerates_small_offsets() {
        // a couple hundred meters and a few meters of elevation are fine
        let station = resolve_station("ZEP", 78.909, 11.887, 480.0).unwrap();
        assert_eq!(station.gaw_id, "ZEP");
    }

    #[test]
    fn test_undefined_station() {
        let err = resolve_station("XXX", 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ConvertError::UndefinedStation(_)));
    }

    #[test]
    fn test_position_mismatch() {
        // one degree of latitude is far beyond the 3000 m tolerance
        let err = resolve_station("ZEP", 79.90715, 11.88668, 474.0).unwrap_err();
        assert!(matches!(err, ConvertError::PositionMismatch { .. }));
    }

    #[test]
    fn test_elevation_mismatch() {
        let err = resolve_station("ZEP", 78.90715, 11.88668, 520.0).unwrap_err();
        assert!(matches!(err, ConvertError::ElevationMismatch { .. }));
    }

    #[test]
    fn test_resolve_parameter() {
        let p = resolve_parameter("C3H8").unwrap();
        assert_eq!(p.comp_name, "propane");
        assert_eq!(p.detection_limit, 4.0);

        assert!(matches!(
            resolve_parameter("C5H8").unwrap_err(),
            ConvertError::UndefinedParameter(_)
        ));
    }

    #[test]
    fn test_resolve_analytical() {
        let a = resolve_analytical("ARL", "v1").unwrap();
        assert_eq!(a.technique, "GC-FID");

        assert!(matches!(
            resolve_analytical("ARL", "v2").unwrap_err(),
            ConvertError::UndefinedMethod { .. }
        ));
    }

    #[test]
    fn test_resolve_submitter() {
        let p = resolve_submitter("John Mund", "John.Mund@noaa.gov").unwrap();
        assert_eq!(p.org_acronym, "NOAA GML");

        assert!(matches!(
            resolve_submitter("Nobody", "nobody@example.org").unwrap_err(),
            ConvertError::UndefinedSubmitter { .. }
        ));
    }

    #[test]
    fn test_haversine_known_distance() {
        // one degree of longitude at the equator is about 60 nautical miles
        let d = haversine_dist_m((0.0, 0.0), (0.0, 1.0));
        assert!((d - 60.0 * 1852.0).abs() < 200.0);
    }
}
