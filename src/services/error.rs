use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that abort a rewrite run. None of them leave a partially applied document.
#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("No such template `{0}`")]
    UnknownTemplate(String),

    /// Every requested whitelist name that is missing or lacks the whitelist flag
    #[error("No such whitelist{}: `{}`", plural(.0.len()), .0.join(", "))]
    Validation(Vec<String>),

    #[error("No such app list for ignore rules `{0}`")]
    UnknownAppList(String),

    #[error("Ignore rule file not found: {0}")]
    IgnoreFileNotFound(Utf8PathBuf),

    #[error("Failed to read ignore rule file {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ignore rule file {path} includes itself (via {})", format_chain(.chain))]
    CyclicIgnoreReference {
        path: Utf8PathBuf,
        chain: Vec<Utf8PathBuf>,
    },
}

fn plural(count: usize) -> &'static str {
    if count > 1 { "s" } else { "" }
}

fn format_chain(chain: &[Utf8PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
