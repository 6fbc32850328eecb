use crate::models::ConfigurationDocument;
use crate::services::ApplyReport;
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Write;

/// Where the rewritten document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// `-`: write the JSON to stderr
    Stderr,
    /// `~`: overwrite the config file
    InPlace(Utf8PathBuf),
    File(Utf8PathBuf),
}

impl OutputTarget {
    pub fn parse(raw: &str, config_path: &Utf8Path) -> Self {
        match raw {
            "-" => Self::Stderr,
            "~" => Self::InPlace(config_path.to_path_buf()),
            path => Self::File(Utf8PathBuf::from(path)),
        }
    }

    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Stderr => None,
            Self::InPlace(path) | Self::File(path) => Some(path),
        }
    }
}

/// Ask on the terminal whether to continue; Enter means yes, Ctrl-C means no.
pub fn confirm_overwrite(prompt: &str) -> Result<bool> {
    match dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
    {
        Ok(confirmed) => Ok(confirmed),
        Err(e) => {
            tracing::debug!("Confirmation interrupted: {}", e);
            Ok(false)
        }
    }
}

/// Check the destination before anything is read.
///
/// An existing output file needs `force_overwrite` or a confirmation. A missing
/// parent directory is created with `mkdir` and is an error otherwise.
///
/// # Returns
/// `false` if the user declined to overwrite
pub fn prepare_output<F>(
    target: &OutputTarget,
    force_overwrite: bool,
    mkdir: bool,
    confirm: F,
) -> Result<bool>
where
    F: FnOnce(&str) -> Result<bool>,
{
    let OutputTarget::File(path) = target else {
        return Ok(true);
    };

    if path.is_file() && !force_overwrite {
        let prompt = "output file exists, do you want to continue? \
                      (use `-w` or `--force-overwrite` to skip this interrupt)";
        if !confirm(prompt)? {
            return Ok(false);
        }
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => return Ok(true),
    };

    if !parent.is_dir() {
        if !mkdir {
            bail!("No such directory: `{}` (use `-m` or `--mkdir` to create it)", parent);
        }
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent))?;
        tracing::info!("Created output directory {}", parent);
    }

    Ok(true)
}

/// Serialize and write the document to `target`.
pub fn write_document(
    target: &OutputTarget,
    document: &ConfigurationDocument,
    pretty: bool,
) -> Result<()> {
    let json = document
        .to_json(pretty)
        .context("Failed to serialize config to JSON")?;

    match target.path() {
        None => {
            let mut stderr = std::io::stderr().lock();
            stderr
                .write_all(json.as_bytes())
                .context("Failed to write config to stderr")?;
        }
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write config: {}", path))?;
            tracing::info!("Wrote config to {}", path);
        }
    }

    Ok(())
}

/// Human summary printed after a file write.
pub fn render_report(report: &ApplyReport) -> String {
    match report.unapplied.len() {
        0 => "OK!".to_string(),
        count => {
            let header = if count == 1 {
                "The config of this app was unchanged:"
            } else {
                "The config of these apps was unchanged:"
            };
            let apps: Vec<&str> = report.unapplied.iter().map(String::as_str).collect();
            format!("{}\n\n{}\n", header, apps.join("\n"))
        }
    }
}
