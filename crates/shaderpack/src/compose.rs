//! Per-dimension override discovery and slot-wise composition.
//!
//! A pack may ship override folders next to its base programs:
//!
//! ```text
//! <root>/
//!   gbuffers_terrain.vsh    # base layer
//!   world0/                 # overworld overrides
//!   world-1/                # nether overrides
//!   world1/                 # end overrides
//! ```
//!
//! Composition is slot-wise: an override folder that only defines `final`
//! still inherits every other program from the base layer.

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;

use crate::error::{Error, Result};
use crate::program::{ProgramLayer, ProgramSlot, ProgramSource};

/// The fixed composition targets of a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProgramContext {
    /// Base programs only, no override layer.
    Base,
    Overworld,
    Nether,
    End,
}

impl ProgramContext {
    pub const ALL: [ProgramContext; 4] = [
        ProgramContext::Base,
        ProgramContext::Overworld,
        ProgramContext::Nether,
        ProgramContext::End,
    ];

    /// Contexts that may carry an override layer.
    pub const DIMENSIONS: [ProgramContext; 3] = [
        ProgramContext::Overworld,
        ProgramContext::Nether,
        ProgramContext::End,
    ];

    /// The override folder name under the pack root.
    pub fn override_folder(self) -> Option<&'static str> {
        match self {
            ProgramContext::Base => None,
            ProgramContext::Overworld => Some("world0"),
            ProgramContext::Nether => Some("world-1"),
            ProgramContext::End => Some("world1"),
        }
    }

    /// The dimension identifier this context stands for.
    pub fn dimension_id(self) -> Option<&'static str> {
        match self {
            ProgramContext::Base => None,
            ProgramContext::Overworld => Some("minecraft:overworld"),
            ProgramContext::Nether => Some("minecraft:the_nether"),
            ProgramContext::End => Some("minecraft:the_end"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProgramContext::Base => "base",
            ProgramContext::Overworld => "overworld",
            ProgramContext::Nether => "nether",
            ProgramContext::End => "end",
        }
    }
}

impl fmt::Display for ProgramContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProgramContext {
    type Err = Error;

    /// Accepts the context name, the override folder name or the dimension id.
    fn from_str(s: &str) -> Result<Self> {
        ProgramContext::ALL
            .into_iter()
            .find(|ctx| {
                ctx.name() == s || ctx.override_folder() == Some(s) || ctx.dimension_id() == Some(s)
            })
            .ok_or_else(|| Error::UnknownContext(s.to_string()))
    }
}

/// Look for an override folder and load it as a layer.
///
/// - No root: a degenerate, empty layer (a pack without a backing directory
///   still gets a complete object graph).
/// - `root/subfolder` is not a directory: `None`, there is no override.
///   A folder whose metadata can't be read (permission denied, for
///   example) counts as missing too; this is not an error.
/// - Otherwise the folder is loaded with `root` as the include root, so
///   `/`-prefixed includes reach the pack's shared files.
pub fn discover_override(root: Option<&Utf8Path>, subfolder: &str) -> Result<Option<ProgramLayer>> {
    let Some(root) = root else {
        return Ok(Some(ProgramLayer::default()));
    };

    let dir = root.join(subfolder);
    if !dir.as_std_path().is_dir() {
        if dir.as_std_path().exists() {
            tracing::warn!("Ignoring {}: override location is not a directory", dir);
        } else {
            tracing::debug!("No {} overrides in {}", subfolder, root);
        }
        return Ok(None);
    }

    ProgramLayer::load(Some(&dir), Some(root)).map(Some)
}

/// Which layer a composed slot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrigin {
    Base,
    Override,
}

/// Read-only merge of a base layer and at most one override layer.
///
/// Nothing is copied; lookups consult the override first and fall back to the
/// base slot by slot. Use [`to_layer`](Self::to_layer) for an owned copy.
#[derive(Debug, Clone, Copy)]
pub struct ComposedProgramSet<'a> {
    base: &'a ProgramLayer,
    overrides: Option<&'a ProgramLayer>,
}

impl<'a> ComposedProgramSet<'a> {
    pub fn merge(base: &'a ProgramLayer, overrides: Option<&'a ProgramLayer>) -> Self {
        Self { base, overrides }
    }

    /// The program for `slot`: the override's if it defines one, else the base's.
    pub fn get(&self, slot: ProgramSlot) -> Option<&'a ProgramSource> {
        self.overrides
            .and_then(|layer| layer.get(slot))
            .or_else(|| self.base.get(slot))
    }

    pub fn origin(&self, slot: ProgramSlot) -> Option<SlotOrigin> {
        if self.is_overridden(slot) {
            Some(SlotOrigin::Override)
        } else if self.base.contains(slot) {
            Some(SlotOrigin::Base)
        } else {
            None
        }
    }

    pub fn is_overridden(&self, slot: ProgramSlot) -> bool {
        self.overrides.is_some_and(|layer| layer.contains(slot))
    }

    pub fn has_override_layer(&self) -> bool {
        self.overrides.is_some()
    }

    /// Defined slots in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (ProgramSlot, &'a ProgramSource)> + 'a {
        let this = *self;
        ProgramSlot::all().filter_map(move |slot| this.get(slot).map(|source| (slot, source)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Materialize the merge into an owned layer.
    pub fn to_layer(&self) -> ProgramLayer {
        let dir = self
            .overrides
            .and_then(ProgramLayer::dir)
            .or_else(|| self.base.dir())
            .map(Utf8Path::to_path_buf);
        ProgramLayer::from_programs(dir, self.iter().map(|(slot, source)| (slot, source.clone())))
    }
}

impl PartialEq for ComposedProgramSet<'_> {
    /// Two views are equal when they resolve every slot to the same program.
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for ComposedProgramSet<'_> {}
