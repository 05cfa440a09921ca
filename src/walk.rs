use crate::error::SweepError;
use crate::options::SweepOptions;
use crate::types::{DiscoveredFile, Discovery, SeenKey};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, SweepError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| SweepError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(SweepError::GlobSet)
}
/// Matches against the path below the walk root and against the bare file name.
fn matches(set: &GlobSet, root: &Path, path: &Path) -> bool {
    let below = path.strip_prefix(root).unwrap_or(path);
    set.is_match(below) || path.file_name().is_some_and(|name| set.is_match(name))
}
/// `(device, inode)` when the platform reports usable values, else the canonical path.
fn seen_key(path: &Path) -> SeenKey {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let Ok(meta) = fs::metadata(path) {
            if meta.dev() != 0 || meta.ino() != 0 {
                return SeenKey::Inode {
                    dev: meta.dev(),
                    ino: meta.ino(),
                };
            }
        }
    }
    let resolved = fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf());
    SeenKey::Path(resolved)
}
struct Walker<'a> {
    options: &'a SweepOptions,
    include: Option<GlobSet>,
    ignore: Option<GlobSet>,
    excluded: HashSet<SeenKey>,
    seen: HashSet<SeenKey>,
    discovery: Discovery,
}
impl<'a> Walker<'a> {
    fn new(options: &'a SweepOptions) -> Result<Self, SweepError> {
        let excluded = options
            .exclude
            .iter()
            .filter(|p| p.exists())
            .map(|p| seen_key(p))
            .collect();
        Ok(Self {
            options,
            include: build_globset(&options.include_patterns)?,
            ignore: build_globset(&options.ignore_patterns)?,
            excluded,
            seen: HashSet::new(),
            discovery: Discovery::default(),
        })
    }
    fn run(mut self) -> Discovery {
        let options = self.options;
        for input in &options.inputs {
            let resolved = match fs::canonicalize(input) {
                Ok(p) => p,
                Err(_) => {
                    warn!("input {} does not exist and will be skipped", input.display());
                    self.discovery.missing.push(input.clone());
                    continue;
                }
            };
            if resolved.is_file() {
                debug!("root is file -> {}", resolved.display());
                let relative = PathBuf::from(resolved.file_name().unwrap_or_default());
                self.accept(resolved, relative);
            } else {
                self.walk_dir(&resolved);
            }
        }
        self.discovery
    }
    fn walk_dir(&mut self, root: &Path) {
        let respect_gitignore = self.options.respect_gitignore;
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .hidden(!self.options.include_hidden)
            .git_ignore(respect_gitignore)
            .git_exclude(respect_gitignore)
            .git_global(respect_gitignore)
            .parents(respect_gitignore)
            .require_git(false)
            .ignore(false)
            .max_depth(self.options.max_depth.map(|depth| depth + 1))
            .follow_links(self.options.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));
        if let Some(ref set) = self.ignore {
            let set = set.clone();
            let walk_root = root.to_path_buf();
            builder.filter_entry(move |entry| {
                if entry.depth() == 0 || !matches(&set, &walk_root, entry.path()) {
                    return true;
                }
                debug!("skip ignored -> {}", entry.path().display());
                false
            });
        }
        let root_name = PathBuf::from(root.file_name().unwrap_or_default());
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("walk error under {}: {}", root.display(), e);
                    self.discovery.walk_errors += 1;
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                if entry.depth() > 0 {
                    debug!("dir -> {} depth={}", entry.path().display(), entry.depth());
                }
                continue;
            }
            if let Some(ref set) = self.include {
                if !matches(set, root, entry.path()) {
                    debug!("skip not included -> {}", entry.path().display());
                    continue;
                }
            }
            let below = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let relative = root_name.join(below);
            self.accept(entry.into_path(), relative);
        }
    }
    fn accept(&mut self, path: PathBuf, relative: PathBuf) {
        let key = seen_key(&path);
        if self.excluded.contains(&key) {
            debug!("skip excluded -> {}", path.display());
            return;
        }
        if !self.seen.insert(key.clone()) {
            debug!("skip seen key -> {} key={:?}", path.display(), key);
            return;
        }
        debug!("file -> {}", path.display());
        self.discovery.files.push(DiscoveredFile {
            path,
            relative,
            key,
        });
    }
}
/// Enumerates the files named by `options.inputs`.
///
/// Missing inputs and unreadable entries are recorded on the returned
/// [`Discovery`] rather than failing the walk; only invalid glob patterns are
/// reported as errors.
pub fn discover(options: &SweepOptions) -> Result<Discovery, SweepError> {
    Ok(Walker::new(options)?.run())
}
