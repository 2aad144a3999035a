//! User-tunable options declared in program sources.
//!
//! Packs expose options through ordinary preprocessor defines:
//!
//! ```glsl
//! #define SHADOW_QUALITY 2 // [1 2 4]
//! #define BLOOM
//! //#define MOTION_BLUR
//! ```
//!
//! A value define needs a bracketed list of allowed values in its trailing
//! comment; without one it is a constant, not an option. A bare define is a
//! boolean option that defaults to on, and commenting it out flips the default
//! to off.

use std::collections::BTreeMap;

use crate::config::ShaderPackConfig;

/// What values an option accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    Boolean,
    Value { allowed: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderOption {
    pub name: String,
    pub default: String,
    pub kind: OptionKind,
}

fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The `[a b c]` list in a trailing `// ...` comment.
fn allowed_values(comment: &str) -> Option<Vec<String>> {
    let start = comment.find('[')?;
    let end = start + comment[start..].find(']')?;
    Some(
        comment[start + 1..end]
            .split_whitespace()
            .map(str::to_string)
            .collect(),
    )
}

fn parse_define(line: &str) -> Option<ShaderOption> {
    let line = line.trim();
    let (commented, line) = match line.strip_prefix("//") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, line),
    };

    let rest = line.strip_prefix("#define")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();

    let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (name, rest) = rest.split_at(name_end);
    if !valid_name(name) || name.starts_with("MC_") {
        return None;
    }
    let rest = rest.trim_start();

    if rest.is_empty() || rest.starts_with("//") {
        return Some(ShaderOption {
            name: name.to_string(),
            default: (!commented).to_string(),
            kind: OptionKind::Boolean,
        });
    }

    if commented {
        return None;
    }

    let (value, comment) = match rest.split_once("//") {
        Some((value, comment)) => (value.trim(), comment),
        None => return None,
    };
    if value.is_empty() || value.contains(char::is_whitespace) {
        return None;
    }

    let mut allowed = allowed_values(comment)?;
    if !allowed.iter().any(|v| v == value) {
        allowed.insert(0, value.to_string());
    }

    Some(ShaderOption {
        name: name.to_string(),
        default: value.to_string(),
        kind: OptionKind::Value { allowed },
    })
}

/// Options discovered across a pack's program sources, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderOptions {
    options: BTreeMap<String, ShaderOption>,
}

impl ShaderOptions {
    /// Scan `sources` line by line. The first declaration of a name wins.
    pub fn discover<'a>(sources: impl IntoIterator<Item = &'a str>) -> Self {
        let mut options = BTreeMap::new();
        for source in sources {
            for option in source.lines().filter_map(parse_define) {
                options.entry(option.name.clone()).or_insert(option);
            }
        }
        Self { options }
    }

    pub fn get(&self, name: &str) -> Option<&ShaderOption> {
        self.options.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShaderOption> {
        self.options.values()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Seed `config` with every default it doesn't already hold. Returns how
    /// many values were added.
    pub fn apply_defaults(&self, config: &mut ShaderPackConfig) -> usize {
        self.iter()
            .filter(|option| config.apply_default(&option.name, &option.default))
            .count()
    }

    /// The stored value for `name`, or its default.
    pub fn effective_value<'a>(&'a self, name: &str, config: &'a ShaderPackConfig) -> Option<&'a str> {
        let option = self.get(name)?;
        Some(config.get(name).unwrap_or(option.default.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::utf8;
    use tempfile::tempdir;

    const SOURCE: &str = "\
#version 120
#define SHADOW_QUALITY 2 // [1 2 4]
#define BLOOM // Glow around bright pixels
  //  #define MOTION_BLUR
#define PI 3.14159
#define FOG_DENSITY 0.5 // [0.25 1.0]
#define MC_VERSION
#define 9LIVES
#defineX
//#define EXPOSURE 1.0 // [0.5 1.0]
";

    #[test]
    fn test_discover() {
        let options = ShaderOptions::discover([SOURCE]);
        let names: Vec<_> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["BLOOM", "FOG_DENSITY", "MOTION_BLUR", "SHADOW_QUALITY"]);

        let quality = options.get("SHADOW_QUALITY").unwrap();
        assert_eq!(quality.default, "2");
        assert_eq!(
            quality.kind,
            OptionKind::Value {
                allowed: vec!["1".to_string(), "2".to_string(), "4".to_string()]
            }
        );

        assert_eq!(options.get("BLOOM").unwrap().default, "true");
        assert_eq!(options.get("BLOOM").unwrap().kind, OptionKind::Boolean);
        assert_eq!(options.get("MOTION_BLUR").unwrap().default, "false");
    }

    #[test]
    fn test_default_is_added_to_allowed_values() {
        let options = ShaderOptions::discover([SOURCE]);
        assert_eq!(
            options.get("FOG_DENSITY").unwrap().kind,
            OptionKind::Value {
                allowed: vec!["0.5".to_string(), "0.25".to_string(), "1.0".to_string()]
            }
        );
    }

    #[test]
    fn test_first_declaration_wins() {
        let options = ShaderOptions::discover(["#define BLOOM\n", "//#define BLOOM\n"]);
        assert_eq!(options.len(), 1);
        assert_eq!(options.get("BLOOM").unwrap().default, "true");
    }

    #[test]
    fn test_apply_defaults_keeps_user_values() {
        let dir = tempdir().unwrap();
        let mut config = ShaderPackConfig::new("pack", &utf8(dir.path()));
        config.load();
        config.set("SHADOW_QUALITY", "4");

        let options = ShaderOptions::discover([SOURCE]);
        assert_eq!(options.apply_defaults(&mut config), 3);
        assert_eq!(config.get("SHADOW_QUALITY"), Some("4"));
        assert_eq!(config.get("BLOOM"), Some("true"));

        assert_eq!(options.apply_defaults(&mut config), 0);
    }

    #[test]
    fn test_effective_value() {
        let dir = tempdir().unwrap();
        let mut config = ShaderPackConfig::new("pack", &utf8(dir.path()));
        config.load();
        config.set("BLOOM", "false");

        let options = ShaderOptions::discover([SOURCE]);
        assert_eq!(options.effective_value("BLOOM", &config), Some("false"));
        assert_eq!(options.effective_value("SHADOW_QUALITY", &config), Some("2"));
        assert_eq!(options.effective_value("PI", &config), None);
    }
}
