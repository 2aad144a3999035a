//! `#include` expansion for program sources.
//!
//! Include targets starting with `/` are looked up from the include root (the
//! pack root, shared by the base and every override layer). Anything else is
//! relative to the directory of the file containing the directive.

use crate::error::{Error, Result};
use crate::utils::{resolve_from_dir, resolve_in_root};
use camino::{Utf8Path, Utf8PathBuf};

/// Extract the target of an `#include "path"` (or `#include <path>`) line.
fn parse_include(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('#')?.trim_start();
    let rest = rest.strip_prefix("include")?.trim();

    let (open, close) = match rest.chars().next()? {
        '"' => ('"', '"'),
        '<' => ('<', '>'),
        _ => return None,
    };

    let inner = rest.strip_prefix(open)?;
    let end = inner.find(close)?;
    let target = inner[..end].trim();
    (!target.is_empty()).then_some(target)
}

/// Read a source file that is known to be required.
pub(crate) fn read_source(path: &Utf8Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path.as_std_path())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

struct IncludeExpander<'a> {
    include_root: &'a Utf8Path,
    stack: Vec<Utf8PathBuf>,
}

impl IncludeExpander<'_> {
    fn resolve(&self, from: &Utf8Path, target: &str) -> Result<Utf8PathBuf> {
        if target.starts_with('/') {
            return resolve_in_root(self.include_root, target);
        }
        let dir = from.parent().unwrap_or(self.include_root);
        resolve_from_dir(self.include_root, dir, target)
    }

    fn expand(&mut self, path: &Utf8Path, source: &str, out: &mut String) -> Result<()> {
        self.stack.push(path.to_path_buf());

        for line in source.lines() {
            let Some(target) = parse_include(line) else {
                out.push_str(line);
                out.push('\n');
                continue;
            };

            let resolved = self.resolve(path, target)?;
            if self.stack.contains(&resolved) {
                return Err(Error::IncludeCycle(resolved));
            }

            let included = match read_source(&resolved) {
                Ok(text) => text,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(Error::IncludeNotFound {
                        path: resolved,
                        from: path.to_path_buf(),
                    });
                }
                Err(source) => {
                    return Err(Error::ProgramRead {
                        path: resolved,
                        source,
                    });
                }
            };

            self.expand(&resolved, &included, out)?;
        }

        self.stack.pop();
        Ok(())
    }
}

/// Expand every `#include` in `source`, which was read from `path`.
pub fn expand_includes(include_root: &Utf8Path, path: &Utf8Path, source: &str) -> Result<String> {
    let mut expander = IncludeExpander {
        include_root,
        stack: Vec::new(),
    };
    let mut out = String::with_capacity(source.len());
    expander.expand(path, source, &mut out)?;
    Ok(out)
}
