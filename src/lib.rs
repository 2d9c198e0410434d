pub mod ebas;
pub mod error;
pub mod flagging;
pub mod metadata;
pub mod noaa_flask;
pub mod output;
pub mod parser;
pub mod split;
