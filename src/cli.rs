//! Command-line interface definitions

use crate::types::SoilReading;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Crop Advisor - crop recommendations from soil and climate readings
#[derive(Parser, Debug)]
#[command(name = "crop-advisor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend a crop for one reading
    Predict {
        #[command(flatten)]
        reading: ReadingArgs,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show gauges and the radar profile for a reading
    Analyze {
        #[command(flatten)]
        reading: ReadingArgs,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse the crop encyclopedia
    Crops {
        /// Show a single crop
        #[arg(long)]
        name: Option<String>,
    },

    /// Answer recommendation requests over NATS
    Serve,
}

/// The seven measurements, defaulting to mid-range values
#[derive(Args, Debug, Clone)]
pub struct ReadingArgs {
    /// Nitrogen content in soil (mg/kg), 0-140
    #[arg(short = 'N', long, default_value_t = 50.0)]
    pub nitrogen: f64,

    /// Phosphorus content in soil (mg/kg), 0-145
    #[arg(short = 'P', long, default_value_t = 50.0)]
    pub phosphorus: f64,

    /// Potassium content in soil (mg/kg), 0-205
    #[arg(short = 'K', long, default_value_t = 50.0)]
    pub potassium: f64,

    /// Average temperature (°C), 0-50
    #[arg(short, long, default_value_t = 25.0)]
    pub temperature: f64,

    /// Relative humidity (%), 0-100
    #[arg(short = 'H', long, default_value_t = 50.0)]
    pub humidity: f64,

    /// Soil pH, 0-14
    #[arg(long, default_value_t = 7.0)]
    pub ph: f64,

    /// Rainfall (mm), 0-300
    #[arg(short, long, default_value_t = 100.0)]
    pub rainfall: f64,
}

impl From<&ReadingArgs> for SoilReading {
    fn from(args: &ReadingArgs) -> Self {
        SoilReading::new(
            args.nitrogen,
            args.phosphorus,
            args.potassium,
            args.temperature,
            args.humidity,
            args.ph,
            args.rainfall,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_predict_defaults() {
        let cli = Cli::try_parse_from(["crop-advisor", "predict"]).unwrap();
        match cli.command {
            Commands::Predict { reading, json } => {
                assert!(!json);
                assert_eq!(SoilReading::from(&reading), SoilReading::default());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_predict_flags() {
        let cli = Cli::try_parse_from([
            "crop-advisor", "predict", "-N", "90", "-P", "42", "-K", "43", "--temperature", "20.8",
            "--humidity", "82", "--ph", "6.5", "--rainfall", "202.9", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict { reading, json } => {
                assert!(json);
                let reading = SoilReading::from(&reading);
                assert_eq!(reading, SoilReading::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
