//! Command-line front-end: argument definitions and output handling.

pub mod output;

pub use output::{OutputTarget, confirm_overwrite, prepare_output, render_report, write_document};

use crate::models::{ListOverride, PresetOverrides};
use crate::services::{ApplyRequest, MergePolicy};
use camino::Utf8PathBuf;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

/// HMA Config auto writer
#[derive(Parser, Debug)]
#[command(name = "hma-rewriter")]
#[command(about = "Apply a Hide My Applist whitelist template to every app listed in it", version)]
pub struct Cli {
    /// Config file path
    #[arg(
        short = 'c',
        long,
        value_name = "CONFIG_FILE",
        required_unless_present_any = ["print_settings", "init_settings"]
    )]
    pub config: Option<Utf8PathBuf>,

    /// Output file path. `-` for stderr, `~` to overwrite the config file
    #[arg(
        short = 'o',
        long,
        value_name = "OUTPUT_FILE",
        required_unless_present_any = ["print_settings", "init_settings"]
    )]
    pub output: Option<String>,

    /// Overwrite the output file even if it exists
    #[arg(short = 'w', long)]
    pub force_overwrite: bool,

    /// Make parent directories of the output file
    #[arg(short = 'm', long)]
    pub mkdir: bool,

    /// The name of the whitelist to apply (default from settings: `cnapps`)
    #[arg(short = 'n', long, value_name = "WHITELIST_NAME", value_parser = NonEmptyStringValueParser::new())]
    pub name: Option<String>,

    /// Skip apps when applying. `#LIST` skips every app of an app list, a file path
    /// loads rules from a text file (one per line), `//` starts a comment
    #[arg(short = 'i', long, value_name = "RULE")]
    pub ignore: Vec<String>,

    /// Only add the whitelists to apps already in whitelist mode, keeping their other options
    #[arg(long)]
    pub merge: bool,

    /// Add other whitelists for apps
    #[arg(short = 'e', long = "extra-name", value_name = "WHITELIST_NAME")]
    pub extra_names: Vec<String>,

    /// Overwrite presets with the given presets (none given: clear them)
    #[arg(short = 'p', long = "force-presets", value_name = "PRESET", num_args = 0..)]
    pub presets: Option<Vec<String>>,

    /// Overwrite settings presets with the given presets (none given: clear them)
    #[arg(short = 's', long = "force-settings-presets", value_name = "PRESET", num_args = 0..)]
    pub settings_presets: Option<Vec<String>>,

    /// Merge presets into existing ones instead of overwriting (with `--force-presets`)
    #[arg(long)]
    pub merge_presets: bool,

    /// Merge settings presets into existing ones instead of overwriting (with `--force-settings-presets`)
    #[arg(long)]
    pub merge_settings_presets: bool,

    /// Indent the written JSON
    #[arg(long)]
    pub pretty: bool,

    /// Settings file (default: hma-rewriter.yaml in the working directory)
    #[arg(long, value_name = "PATH")]
    pub settings: Option<Utf8PathBuf>,

    /// Print the effective settings as YAML and exit
    #[arg(long)]
    pub print_settings: bool,

    /// Write the effective settings to the settings file and exit
    #[arg(long, conflicts_with = "print_settings")]
    pub init_settings: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Requested preset overrides; a flag given without values is still a request.
    pub fn overrides(&self) -> PresetOverrides {
        PresetOverrides {
            presets: ListOverride::from_request(self.presets.clone(), self.merge_presets),
            settings_presets: ListOverride::from_request(
                self.settings_presets.clone(),
                self.merge_settings_presets,
            ),
        }
    }

    /// Build the engine request, falling back to `default_whitelist` without `--name`.
    pub fn apply_request(&self, default_whitelist: &str) -> ApplyRequest {
        ApplyRequest {
            whitelist_name: self
                .name
                .clone()
                .unwrap_or_else(|| default_whitelist.to_string()),
            extra_whitelists: self.extra_names.clone(),
            ignore_rules: self.ignore.clone(),
            policy: MergePolicy::from_merge_flag(self.merge),
            overrides: self.overrides(),
        }
    }
}
