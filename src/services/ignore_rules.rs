//! Ignore rules: which apps of the whitelist are skipped when applying it.
//!
//! Every rule line is classified on its own:
//! - `// ...` is a comment; text after an inline `//` is dropped
//! - a path (`/x`, `C:\x`, `./x`, `../x`) loads more rules from a text file, one per line
//! - `#name` skips every member of the app list `name` (whitelist or not)
//! - anything else is an app identifier to skip
//!
//! Rule files may include other rule files. A file that includes itself, directly or
//! through other files, is rejected instead of being followed forever.

use crate::services::{RewriteError, TemplateCatalog};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::sync::LazyLock;

/// Marker starting a comment, on its own line or after a rule.
pub const IGNORE_COMMENT: &str = "//";

/// Prefix of a rule naming an app list.
pub const APP_LIST_PREFIX: char = '#';

static DRIVE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.:").expect("Invalid drive prefix regex"));

/// A single classified ignore rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreRule {
    File(Utf8PathBuf),
    AppList(String),
    App(String),
}

impl IgnoreRule {
    /// Classify one rule line. Comments and blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.starts_with(IGNORE_COMMENT) {
            return None;
        }

        let rule = match line.split_once(IGNORE_COMMENT) {
            Some((rule, _comment)) => rule.trim(),
            None => line,
        };

        if rule.is_empty() {
            None
        } else if looks_like_filepath(rule) {
            Some(Self::File(Utf8PathBuf::from(rule)))
        } else if let Some(name) = rule.strip_prefix(APP_LIST_PREFIX) {
            Some(Self::AppList(name.to_string()))
        } else {
            Some(Self::App(rule.to_string()))
        }
    }
}

/// Path heuristic, checked on forward-slash normalized text.
pub fn looks_like_filepath(text: &str) -> bool {
    let text = text.trim().replace('\\', "/");
    text.starts_with('/')
        || DRIVE_PREFIX.is_match(&text)
        || text.starts_with("./")
        || text.starts_with("../")
}

/// Source of ignore rule files.
#[cfg_attr(test, mockall::automock)]
pub trait RuleFileReader {
    /// Stable identity of `path`, used to detect include cycles.
    fn canonicalize(&self, path: &Utf8Path) -> Result<Utf8PathBuf, RewriteError>;

    fn read_to_string(&self, path: &Utf8Path) -> Result<String, RewriteError>;
}

/// Reads rule files from disk as UTF-8. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRuleReader;

impl RuleFileReader for FsRuleReader {
    fn canonicalize(&self, path: &Utf8Path) -> Result<Utf8PathBuf, RewriteError> {
        path.canonicalize_utf8().map_err(|e| io_error(path, e))
    }

    fn read_to_string(&self, path: &Utf8Path) -> Result<String, RewriteError> {
        std::fs::read_to_string(path).map_err(|e| io_error(path, e))
    }
}

fn io_error(path: &Utf8Path, source: std::io::Error) -> RewriteError {
    if source.kind() == ErrorKind::NotFound {
        RewriteError::IgnoreFileNotFound(path.to_path_buf())
    } else {
        RewriteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Resolves rule lines into the flat set of app identifiers to skip.
pub struct IgnoreRuleResolver<'a, R> {
    catalog: TemplateCatalog<'a>,
    reader: &'a R,
}

impl<'a, R: RuleFileReader> IgnoreRuleResolver<'a, R> {
    pub fn new(catalog: TemplateCatalog<'a>, reader: &'a R) -> Self {
        Self { catalog, reader }
    }

    /// Resolve `rules`, expanding rule files and app lists.
    ///
    /// Any unreadable file or unknown app list fails the whole resolution.
    pub fn resolve<S: AsRef<str>>(&self, rules: &[S]) -> Result<BTreeSet<String>, RewriteError> {
        let excluded = self.resolve_lines(rules.iter().map(AsRef::<str>::as_ref), &[])?;
        tracing::debug!("Resolved {} ignore rule(s) to {} app(s)", rules.len(), excluded.len());
        Ok(excluded)
    }

    fn resolve_lines<'l>(
        &self,
        lines: impl Iterator<Item = &'l str>,
        chain: &[Utf8PathBuf],
    ) -> Result<BTreeSet<String>, RewriteError> {
        let mut excluded = BTreeSet::new();

        for line in lines {
            match IgnoreRule::parse(line) {
                None => {}
                Some(IgnoreRule::App(app)) => {
                    excluded.insert(app);
                }
                Some(IgnoreRule::AppList(name)) => {
                    if !self.catalog.contains(&name) {
                        return Err(RewriteError::UnknownAppList(name));
                    }
                    let members = self.catalog.members(&name)?;
                    tracing::debug!("Ignoring {} app(s) of app list `{}`", members.len(), name);
                    excluded.extend(members);
                }
                Some(IgnoreRule::File(path)) => {
                    excluded.extend(self.resolve_file(&path, chain)?);
                }
            }
        }

        Ok(excluded)
    }

    fn resolve_file(
        &self,
        path: &Utf8Path,
        chain: &[Utf8PathBuf],
    ) -> Result<BTreeSet<String>, RewriteError> {
        let key = self.reader.canonicalize(path)?;

        let mut nested = chain.to_vec();
        nested.push(key.clone());

        if chain.contains(&key) {
            return Err(RewriteError::CyclicIgnoreReference {
                path: key,
                chain: nested,
            });
        }

        let contents = self.reader.read_to_string(&key)?;
        tracing::debug!("Loading ignore rules from {}", key);

        self.resolve_lines(contents.lines(), &nested)
    }
}
