//! Byte-size lookups for source locators.
//!
//! Sizes come from an external [`SizeResolver`]. The filesystem resolver maps
//! locators onto a local site checkout; anything it cannot map, or that does
//! not exist on disk, is unresolved and counts as zero in totals.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::ReportConfig;
use crate::resolver::normalize_source;

/// Looks up the byte size of the file behind a source locator.
pub trait SizeResolver {
    /// Size in bytes, or `None` when the locator cannot be resolved.
    fn size_of(&self, source: &str) -> Option<u64>;
}

impl<F> SizeResolver for F
where
    F: Fn(&str) -> Option<u64>,
{
    fn size_of(&self, source: &str) -> Option<u64> {
        self(source)
    }
}

/// Resolves locators against a local copy of the site.
#[derive(Debug, Clone, Default)]
pub struct FsSizeResolver {
    root_dir: PathBuf,
    content: Option<(String, PathBuf)>,
    includes: Option<(String, PathBuf)>,
}

impl FsSizeResolver {
    /// Resolver rooted at `root_dir` with no URL prefixes mapped.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            content: None,
            includes: None,
        }
    }

    /// Map URLs starting with `url` onto `dir`, ahead of the includes prefix.
    #[must_use]
    pub fn with_content(mut self, url: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.content = Some((url.into(), dir.into()));
        self
    }

    /// Map URLs starting with `url` onto `dir`.
    #[must_use]
    pub fn with_includes(mut self, url: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.includes = Some((url.into(), dir.into()));
        self
    }

    /// Build from configuration. `root_override` wins over `root_dir`.
    #[must_use]
    pub fn from_config(config: &ReportConfig, root_override: Option<&Path>) -> Self {
        let root = root_override.map_or_else(|| config.root_dir(), Path::to_path_buf);
        let mut resolver = Self::new(root);
        if let (Some(url), Some(dir)) = (&config.content_url, &config.content_dir) {
            resolver = resolver.with_content(url.clone(), dir.clone());
        }
        if let (Some(url), Some(dir)) = (&config.includes_url, &config.includes_dir) {
            resolver = resolver.with_includes(url.clone(), dir.clone());
        }
        resolver
    }

    /// Local path a locator maps to, without checking that it exists.
    #[must_use]
    pub fn local_path(&self, source: &str) -> Option<PathBuf> {
        if source.is_empty() {
            return None;
        }

        let path = if !is_url(source) {
            self.root_dir.join(source.trim_start_matches('/'))
        } else if let Some(path) = map_prefix(source, self.content.as_ref()) {
            path
        } else if let Some(path) = map_prefix(source, self.includes.as_ref()) {
            path
        } else {
            let url_path = url_path(source)?;
            self.root_dir.join(url_path.trim_start_matches('/'))
        };

        let text = path.to_string_lossy();
        let stripped = normalize_source(&text);
        if stripped.is_empty() {
            return None;
        }
        Some(PathBuf::from(stripped))
    }
}

impl SizeResolver for FsSizeResolver {
    fn size_of(&self, source: &str) -> Option<u64> {
        let path = self.local_path(source)?;
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Some(meta.len()),
            Ok(_) => None,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Cannot read size of {}: {}", path.display(), e);
                None
            }
        }
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http") || source.starts_with("//")
}

fn map_prefix(source: &str, mapping: Option<&(String, PathBuf)>) -> Option<PathBuf> {
    let (url, dir) = mapping?;
    let rest = source.strip_prefix(url.as_str())?;
    Some(dir.join(rest.trim_start_matches('/')))
}

/// Path component of an absolute or protocol-relative URL.
fn url_path(source: &str) -> Option<&str> {
    let after_scheme = source.split_once("//").map(|(_, rest)| rest)?;
    let path = after_scheme.find('/').map(|idx| &after_scheme[idx..])?;
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    (path.len() > 1).then_some(path)
}

/// Memoizes size lookups by normalized source for one report run.
///
/// Unresolved lookups are cached too, so a missing file is stat'ed once.
#[derive(Debug)]
pub struct SizeCache<R> {
    resolver: R,
    sizes: HashMap<String, Option<u64>>,
}

impl<R: SizeResolver> SizeCache<R> {
    /// Wrap `resolver` with an empty cache.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            sizes: HashMap::new(),
        }
    }

    /// Size of `source`, resolving it on first use.
    pub fn size_of(&mut self, source: &str) -> Option<u64> {
        let key = normalize_source(source);
        if key.is_empty() {
            return None;
        }
        if let Some(size) = self.sizes.get(key) {
            tracing::trace!("Size cache hit for {}", key);
            return *size;
        }
        let size = self.resolver.size_of(source);
        self.sizes.insert(key.to_string(), size);
        size
    }

    /// Number of distinct sources looked up so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether nothing has been looked up yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
