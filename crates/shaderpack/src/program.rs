//! Program definitions and the layers that hold them.
//!
//! A [`ProgramLayer`] is one directory's worth of programs: the pack root for
//! the base layer, or one of the per-dimension override folders. Each program
//! lives in a fixed [`ProgramSlot`] and is made of stage files named after the
//! slot:
//!
//! ```text
//! <dir>/
//!   gbuffers_terrain.vsh   # vertex stage (required)
//!   gbuffers_terrain.gsh   # geometry stage (optional)
//!   gbuffers_terrain.fsh   # fragment stage (required)
//!   composite1.vsh
//!   composite1.fsh
//! ```
//!
//! A slot is only defined when both the vertex and the fragment stage exist.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{Error, Result};
use crate::include::{expand_includes, read_source};

/// Number of numbered `deferred`/`composite` passes.
pub const PASS_COUNT: u8 = 16;

/// A named position in the program schema.
///
/// `Deferred` and `Composite` carry a pass index in `0..PASS_COUNT`; pass 0 is
/// the unnumbered program (`composite`), pass `n` is `composite<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProgramSlot {
    Shadow,
    GbuffersBasic,
    GbuffersTextured,
    GbuffersTexturedLit,
    GbuffersSkyBasic,
    GbuffersSkyTextured,
    GbuffersClouds,
    GbuffersTerrain,
    GbuffersDamagedBlock,
    GbuffersBlock,
    GbuffersBeaconBeam,
    GbuffersItem,
    GbuffersEntities,
    GbuffersArmorGlint,
    GbuffersSpiderEyes,
    GbuffersHand,
    GbuffersWeather,
    GbuffersWater,
    GbuffersHandWater,
    Deferred(u8),
    Composite(u8),
    Final,
}

const NAMED_SLOTS: [(ProgramSlot, &str); 20] = [
    (ProgramSlot::Shadow, "shadow"),
    (ProgramSlot::GbuffersBasic, "gbuffers_basic"),
    (ProgramSlot::GbuffersTextured, "gbuffers_textured"),
    (ProgramSlot::GbuffersTexturedLit, "gbuffers_textured_lit"),
    (ProgramSlot::GbuffersSkyBasic, "gbuffers_skybasic"),
    (ProgramSlot::GbuffersSkyTextured, "gbuffers_skytextured"),
    (ProgramSlot::GbuffersClouds, "gbuffers_clouds"),
    (ProgramSlot::GbuffersTerrain, "gbuffers_terrain"),
    (ProgramSlot::GbuffersDamagedBlock, "gbuffers_damagedblock"),
    (ProgramSlot::GbuffersBlock, "gbuffers_block"),
    (ProgramSlot::GbuffersBeaconBeam, "gbuffers_beaconbeam"),
    (ProgramSlot::GbuffersItem, "gbuffers_item"),
    (ProgramSlot::GbuffersEntities, "gbuffers_entities"),
    (ProgramSlot::GbuffersArmorGlint, "gbuffers_armor_glint"),
    (ProgramSlot::GbuffersSpiderEyes, "gbuffers_spidereyes"),
    (ProgramSlot::GbuffersHand, "gbuffers_hand"),
    (ProgramSlot::GbuffersWeather, "gbuffers_weather"),
    (ProgramSlot::GbuffersWater, "gbuffers_water"),
    (ProgramSlot::GbuffersHandWater, "gbuffers_hand_water"),
    (ProgramSlot::Final, "final"),
];

fn pass_name(prefix: &str, index: u8) -> String {
    if index == 0 {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, index)
    }
}

fn parse_pass(name: &str, prefix: &str) -> Option<u8> {
    let rest = name.strip_prefix(prefix)?;
    if rest.is_empty() {
        return Some(0);
    }
    if rest.starts_with('0') {
        return None;
    }
    rest.parse::<u8>().ok().filter(|&i| i < PASS_COUNT)
}

impl ProgramSlot {
    /// Every slot in schema order (the same order [`Ord`] sorts them in).
    pub fn all() -> impl Iterator<Item = ProgramSlot> {
        let gbuffers = NAMED_SLOTS
            .iter()
            .map(|(slot, _)| *slot)
            .filter(|slot| *slot != ProgramSlot::Final);
        let deferred = (0..PASS_COUNT).map(ProgramSlot::Deferred);
        let composite = (0..PASS_COUNT).map(ProgramSlot::Composite);

        gbuffers
            .chain(deferred)
            .chain(composite)
            .chain(std::iter::once(ProgramSlot::Final))
    }

    /// The file stem of this slot's stage files.
    pub fn name(&self) -> String {
        match self {
            ProgramSlot::Deferred(i) => pass_name("deferred", *i),
            ProgramSlot::Composite(i) => pass_name("composite", *i),
            named => NAMED_SLOTS
                .iter()
                .find(|(slot, _)| slot == named)
                .map(|(_, name)| name.to_string())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for ProgramSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ProgramSlot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some((slot, _)) = NAMED_SLOTS.iter().find(|(_, name)| *name == s) {
            return Ok(*slot);
        }
        if let Some(i) = parse_pass(s, "deferred") {
            return Ok(ProgramSlot::Deferred(i));
        }
        if let Some(i) = parse_pass(s, "composite") {
            return Ok(ProgramSlot::Composite(i));
        }
        Err(Error::UnknownSlot(s.to_string()))
    }
}

/// The stage sources of one program, with includes already expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    name: String,
    vertex: String,
    geometry: Option<String>,
    fragment: String,
}

impl ProgramSource {
    pub fn new(
        name: impl Into<String>,
        vertex: impl Into<String>,
        geometry: Option<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex: vertex.into(),
            geometry,
            fragment: fragment.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn geometry(&self) -> Option<&str> {
        self.geometry.as_deref()
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// All stage sources, in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.vertex.as_str())
            .chain(self.geometry.as_deref())
            .chain(std::iter::once(self.fragment.as_str()))
    }
}

/// One tree of program definitions.
///
/// An empty layer (no slots defined) is a valid state and is distinct from a
/// layer that doesn't exist at all, which callers model as `Option::None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramLayer {
    dir: Option<Utf8PathBuf>,
    programs: BTreeMap<ProgramSlot, ProgramSource>,
}

impl ProgramLayer {
    /// Load every slot found in `dir`.
    ///
    /// `include_root` is where `/`-prefixed includes are resolved; it defaults
    /// to `dir`. A `None` directory yields an empty layer without touching the
    /// filesystem. Missing stage files leave their slot undefined; failing to
    /// read a stage file that exists is an error.
    pub fn load(dir: Option<&Utf8Path>, include_root: Option<&Utf8Path>) -> Result<Self> {
        let Some(dir) = dir else {
            return Ok(Self::default());
        };
        let include_root = include_root.unwrap_or(dir);

        let mut programs = BTreeMap::new();
        for slot in ProgramSlot::all() {
            if let Some(source) = read_program(dir, include_root, slot)? {
                programs.insert(slot, source);
            }
        }

        tracing::debug!("Loaded {} programs from {}", programs.len(), dir);

        Ok(Self {
            dir: Some(dir.to_path_buf()),
            programs,
        })
    }

    /// Build a layer from already-loaded programs.
    pub fn from_programs(
        dir: Option<Utf8PathBuf>,
        programs: impl IntoIterator<Item = (ProgramSlot, ProgramSource)>,
    ) -> Self {
        Self {
            dir,
            programs: programs.into_iter().collect(),
        }
    }

    /// The directory this layer was loaded from (`None` for a degenerate layer).
    pub fn dir(&self) -> Option<&Utf8Path> {
        self.dir.as_deref()
    }

    pub fn get(&self, slot: ProgramSlot) -> Option<&ProgramSource> {
        self.programs.get(&slot)
    }

    pub fn contains(&self, slot: ProgramSlot) -> bool {
        self.programs.contains_key(&slot)
    }

    /// Defined slots in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (ProgramSlot, &ProgramSource)> {
        self.programs.iter().map(|(slot, source)| (*slot, source))
    }

    pub fn programs(&self) -> impl Iterator<Item = &ProgramSource> {
        self.programs.values()
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

fn read_stage(dir: &Utf8Path, include_root: &Utf8Path, file_name: &str) -> Result<Option<String>> {
    let path = dir.join(file_name);

    let source = match read_source(&path) {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(Error::ProgramRead { path, source }),
    };

    expand_includes(include_root, &path, &source).map(Some)
}

fn read_program(
    dir: &Utf8Path,
    include_root: &Utf8Path,
    slot: ProgramSlot,
) -> Result<Option<ProgramSource>> {
    let name = slot.name();
    let vertex = read_stage(dir, include_root, &format!("{}.vsh", name))?;
    let geometry = read_stage(dir, include_root, &format!("{}.gsh", name))?;
    let fragment = read_stage(dir, include_root, &format!("{}.fsh", name))?;

    match (vertex, fragment) {
        (Some(vertex), Some(fragment)) => Ok(Some(ProgramSource {
            name,
            vertex,
            geometry,
            fragment,
        })),
        (None, None) => Ok(None),
        _ => {
            tracing::debug!(
                "Ignoring incomplete program {} in {}: both a .vsh and a .fsh stage are required",
                name,
                dir
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::utf8;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_slot_names_round_trip() {
        for slot in ProgramSlot::all() {
            assert_eq!(slot.name().parse::<ProgramSlot>().unwrap(), slot);
        }
    }

    #[test]
    fn test_slot_count_and_order() {
        let slots: Vec<ProgramSlot> = ProgramSlot::all().collect();
        assert_eq!(slots.len(), 19 + 2 * PASS_COUNT as usize + 1);

        let mut sorted = slots.clone();
        sorted.sort();
        assert_eq!(slots, sorted);
    }

    #[test]
    fn test_pass_slot_names() {
        assert_eq!(ProgramSlot::Composite(0).name(), "composite");
        assert_eq!(ProgramSlot::Composite(15).name(), "composite15");
        assert_eq!(ProgramSlot::Deferred(3).to_string(), "deferred3");
        assert_eq!(
            "composite7".parse::<ProgramSlot>().unwrap(),
            ProgramSlot::Composite(7)
        );
    }

    #[test]
    fn test_invalid_slot_names() {
        for name in ["composite16", "composite0", "composite01", "gbuffers_sky", ""] {
            assert!(
                matches!(name.parse::<ProgramSlot>(), Err(Error::UnknownSlot(_))),
                "{name} should not parse"
            );
        }
    }

    #[test]
    fn test_load_without_dir_is_empty() {
        let layer = ProgramLayer::load(None, None).unwrap();
        assert!(layer.is_empty());
        assert!(layer.dir().is_none());
    }

    #[test]
    fn test_load_requires_vertex_and_fragment() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        fs::write(root.join("final.vsh"), "v").unwrap();
        fs::write(root.join("final.fsh"), "f").unwrap();
        fs::write(root.join("composite.vsh"), "only vertex").unwrap();
        fs::write(root.join("shadow.fsh"), "only fragment").unwrap();

        let layer = ProgramLayer::load(Some(&root), None).unwrap();
        assert_eq!(layer.len(), 1);

        let program = layer.get(ProgramSlot::Final).unwrap();
        assert_eq!(program.name(), "final");
        assert_eq!(program.vertex(), "v\n");
        assert_eq!(program.fragment(), "f\n");
        assert!(program.geometry().is_none());
        assert!(!layer.contains(ProgramSlot::Composite(0)));
        assert!(!layer.contains(ProgramSlot::Shadow));
    }

    #[test]
    fn test_load_geometry_stage() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        fs::write(root.join("shadow.vsh"), "v").unwrap();
        fs::write(root.join("shadow.gsh"), "g").unwrap();
        fs::write(root.join("shadow.fsh"), "f").unwrap();

        let layer = ProgramLayer::load(Some(&root), None).unwrap();
        let program = layer.get(ProgramSlot::Shadow).unwrap();
        assert_eq!(program.geometry(), Some("g\n"));
        assert_eq!(program.stages().collect::<Vec<_>>(), vec!["v\n", "g\n", "f\n"]);
    }

    #[test]
    fn test_load_uses_include_root_for_absolute_includes() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        let sub = root.join("world-1");
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::create_dir_all(&sub).unwrap();
        fs::write(root.join("lib/fog.glsl"), "fog();").unwrap();
        fs::write(sub.join("final.vsh"), "#include \"/lib/fog.glsl\"\nv").unwrap();
        fs::write(sub.join("final.fsh"), "f").unwrap();

        let layer = ProgramLayer::load(Some(&sub), Some(&root)).unwrap();
        assert_eq!(layer.get(ProgramSlot::Final).unwrap().vertex(), "fog();\nv\n");
        assert_eq!(layer.dir(), Some(sub.as_path()));
    }

    #[test]
    fn test_unreadable_stage_file_fails() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        fs::create_dir(root.join("final.vsh")).unwrap();
        fs::write(root.join("final.fsh"), "f").unwrap();

        let err = ProgramLayer::load(Some(&root), None).unwrap_err();
        assert!(matches!(err, Error::ProgramRead { .. }));
    }
}
