use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    default_override_path, ConvertSettings, InputMode, DEFAULT_EXPORT_APP,
    DEFAULT_EXPORT_APP_VERSION,
};
use crate::error::Result;
use crate::uigf::{ExportApp, DEFAULT_TARGET_VERSION};

#[derive(Parser, Debug)]
#[command(name = "pm2uigf")]
#[command(version, about = "Convert Paimon.moe wish history to UIGF v3 / v4.1")]
pub struct Cli {
    /// Log progress details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a Paimon.moe export (or a UIGF v3 file) to UIGF v4.1
    Convert(ConvertArgs),

    /// Maintain the rank override table
    Overrides {
        #[command(subcommand)]
        command: OverrideCommands,
    },

    /// Validate a UIGF v4.1 document against a JSON schema
    Validate {
        /// Schema JSON file
        schema: PathBuf,

        /// Document to validate
        data: PathBuf,
    },

    /// List reference data sources in merge order
    ListSources,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Output UIGF v4.x file
    pub output: PathBuf,

    /// Paimon.moe local export JSON
    #[arg(long)]
    pub paimon: Option<PathBuf>,

    /// Existing UIGF v3 JSON
    #[arg(long)]
    pub from_v3: Option<PathBuf>,

    /// Also write the intermediate UIGF v3 document here
    #[arg(long)]
    pub v3_out: Option<PathBuf>,

    /// Write items whose rank could not be resolved here
    #[arg(long)]
    pub missing_rank_out: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_EXPORT_APP)]
    pub export_app: String,

    #[arg(long, default_value = DEFAULT_EXPORT_APP_VERSION)]
    pub export_app_version: String,

    #[arg(long, default_value = DEFAULT_TARGET_VERSION)]
    pub target_version: String,

    /// Rank override table (defaults to the user config directory)
    #[arg(long, env = "PM2UIGF_OVERRIDES")]
    pub overrides: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum OverrideCommands {
    /// Create an override table from a missing-rank report
    Init {
        /// missing-rank report
        missing: PathBuf,

        /// Override table to create
        #[arg(value_name = "OVERRIDE")]
        override_path: PathBuf,
    },

    /// Write entries for newly unresolved items not yet in the table
    Todo {
        /// New missing-rank report
        missing: PathBuf,

        /// Existing override table
        #[arg(value_name = "OVERRIDE")]
        override_path: PathBuf,

        /// Output file for the curator
        out: PathBuf,
    },

    /// Merge filled-in entries back into the table
    Merge {
        /// Override table (rewritten in place)
        #[arg(value_name = "OVERRIDE")]
        override_path: PathBuf,

        /// File produced by `todo` and filled in by hand
        todo: PathBuf,
    },
}

impl ConvertArgs {
    pub fn into_settings(self) -> Result<ConvertSettings> {
        let input = InputMode::from_flags(self.paimon, self.from_v3)?;

        let mut settings = ConvertSettings::new(input, self.output);
        settings.v3_out = self.v3_out;
        settings.missing_rank_out = self.missing_rank_out;
        settings.app = ExportApp {
            name: self.export_app,
            version: self.export_app_version,
        };
        settings.target_version = self.target_version;
        settings.overrides_path = self.overrides.unwrap_or_else(default_override_path);
        settings.check()?;

        Ok(settings)
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_args(args: &[&str]) -> ConvertArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Convert(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_convert_defaults() {
        let args = convert_args(&["pm2uigf", "convert", "out.json", "--paimon", "in.json"]);
        let settings = args.into_settings().unwrap();

        assert_eq!(settings.input, InputMode::Paimon("in.json".into()));
        assert_eq!(settings.app.name, "PMOE-Local-Converter");
        assert_eq!(settings.target_version, "v4.1");
    }

    #[test]
    fn test_convert_rejects_unsupported_version() {
        let args = convert_args(&[
            "pm2uigf", "convert", "out.json", "--from-v3", "v3.json", "--target-version", "v5.0",
        ]);
        assert!(args.into_settings().is_err());
    }

    #[test]
    fn test_overrides_subcommands() {
        let cli = Cli::try_parse_from(["pm2uigf", "overrides", "merge", "table.json", "todo.json"])
            .unwrap();
        match cli.command {
            Commands::Overrides {
                command: OverrideCommands::Merge { override_path, todo },
            } => {
                assert_eq!(override_path, PathBuf::from("table.json"));
                assert_eq!(todo, PathBuf::from("todo.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
