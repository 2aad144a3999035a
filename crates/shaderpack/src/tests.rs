use crate::utils::utf8;
use crate::{
    Error, PackIdentity, ProgramContext, ProgramSlot, ShaderPack, ShaderPackConfig, SlotOrigin,
};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    root: Utf8PathBuf,
    config_dir: Utf8PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let dir = tempfile::tempdir().unwrap();
        let base = utf8(dir.path());
        let root = base.join("pack");
        fs::create_dir_all(&root).unwrap();

        Self {
            _dir: dir,
            root,
            config_dir: base.join("config"),
        }
    }

    fn write(&self, relative: &str, contents: impl AsRef<[u8]>) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn program(&self, dir: &str, slot: &str, tag: &str) {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };
        self.write(&format!("{prefix}{slot}.vsh"), format!("// {tag} vertex"));
        self.write(&format!("{prefix}{slot}.fsh"), format!("// {tag} fragment"));
    }

    fn identity(&self) -> PackIdentity {
        PackIdentity::new("test pack", self.config_dir.clone())
    }

    fn load(&self) -> ShaderPack {
        ShaderPack::load(&self.root, self.identity()).unwrap()
    }
}

fn fragment(pack: &ShaderPack, context: ProgramContext, slot: ProgramSlot) -> Option<String> {
    pack.program_set(context)
        .get(slot)
        .map(|program| program.fragment().to_string())
}

#[test]
fn test_missing_override_falls_back_to_base() {
    let fx = Fixture::new();
    fx.program("", "final", "base");
    fx.program("", "composite", "base");

    let pack = fx.load();
    assert!(!pack.has_override(ProgramContext::Overworld));
    for context in ProgramContext::ALL {
        assert_eq!(pack.program_set(context), pack.program_set(ProgramContext::Base));
    }
    assert_eq!(pack.program_set(ProgramContext::Overworld).len(), 2);
}

#[test]
fn test_override_is_slot_wise() {
    let fx = Fixture::new();
    fx.program("", "final", "base");
    fx.program("", "composite", "base");
    fx.program("world-1", "final", "nether");

    let pack = fx.load();
    let nether = pack.program_set(ProgramContext::Nether);

    assert_eq!(
        fragment(&pack, ProgramContext::Nether, ProgramSlot::Final).as_deref(),
        Some("// nether fragment\n")
    );
    assert_eq!(
        fragment(&pack, ProgramContext::Nether, ProgramSlot::Composite(0)).as_deref(),
        Some("// base fragment\n")
    );
    assert_eq!(nether.origin(ProgramSlot::Final), Some(SlotOrigin::Override));
    assert_eq!(nether.origin(ProgramSlot::Composite(0)), Some(SlotOrigin::Base));
    assert_eq!(nether.origin(ProgramSlot::Shadow), None);

    assert_eq!(
        fragment(&pack, ProgramContext::Overworld, ProgramSlot::Final).as_deref(),
        Some("// base fragment\n")
    );
}

#[test]
fn test_missing_and_empty_override_differ_but_compose_alike() {
    let fx = Fixture::new();
    fx.program("", "final", "base");
    fs::create_dir_all(fx.root.join("world1")).unwrap();

    let pack = fx.load();
    assert!(pack.has_override(ProgramContext::End));
    assert!(!pack.has_override(ProgramContext::Overworld));

    let end = pack.program_set(ProgramContext::End);
    let overworld = pack.program_set(ProgramContext::Overworld);
    assert!(end.has_override_layer());
    assert!(!overworld.has_override_layer());
    assert_eq!(end, overworld);
}

#[test]
fn test_override_file_instead_of_folder_is_ignored() {
    let fx = Fixture::new();
    fx.program("", "final", "base");
    fx.write("world0", "not a folder");

    let pack = fx.load();
    assert!(!pack.has_override(ProgramContext::Overworld));
}

#[test]
fn test_loading_twice_is_idempotent() {
    let fx = Fixture::new();
    fx.write("lib/common.glsl", "float common();");
    fx.write("final.vsh", "#include \"/lib/common.glsl\"\nvoid main() {}");
    fx.write("final.fsh", "void main() {}");
    fx.program("world0", "composite", "overworld");
    fx.program("world-1", "final", "nether");

    let first = fx.load();
    let second = fx.load();
    for context in ProgramContext::ALL {
        assert_eq!(first.program_set(context), second.program_set(context));
    }
}

#[test]
fn test_override_includes_reach_pack_root() {
    let fx = Fixture::new();
    fx.write("lib/fog.glsl", "fog();");
    fx.write("world-1/final.vsh", "#include \"/lib/fog.glsl\"\nv");
    fx.write("world-1/final.fsh", "f");

    let pack = fx.load();
    let program = pack.program_set(ProgramContext::Nether).get(ProgramSlot::Final).unwrap();
    assert_eq!(program.vertex(), "fog();\nv\n");
}

#[test]
fn test_broken_include_fails_the_pack() {
    let fx = Fixture::new();
    fx.program("", "final", "base");
    fx.write("world0/final.vsh", "#include \"/lib/missing.glsl\"");
    fx.write("world0/final.fsh", "f");

    let err = ShaderPack::load(&fx.root, fx.identity()).unwrap_err();
    assert!(matches!(err, Error::IncludeNotFound { .. }));
}

#[test]
fn test_usage_errors() {
    let fx = Fixture::new();

    let err = ShaderPack::load(Utf8Path::new(""), fx.identity()).unwrap_err();
    assert!(matches!(err, Error::MissingRoot));

    let missing = fx.root.join("nope");
    let err = ShaderPack::load(&missing, fx.identity()).unwrap_err();
    assert!(matches!(err, Error::InvalidPackRoot(path) if path == missing));

    let pack = fx.load();
    assert!(matches!(
        pack.program_set_for("world2"),
        Err(Error::UnknownContext(name)) if name == "world2"
    ));
    assert!(pack.program_set_for("minecraft:the_end").is_ok());
}

#[test]
fn test_pack_without_optional_resources() {
    let fx = Fixture::new();

    let pack = fx.load();
    assert!(pack.language_map().is_empty());
    assert!(pack.id_map().is_empty());
    assert!(pack.custom_noise_texture().is_none());
    assert!(pack.options().is_empty());
    assert!(pack.base_layer().is_empty());
    assert!(pack.properties().raw().is_empty());
    assert_eq!(pack.root(), fx.root.as_path());
}

#[test]
fn test_languages_and_id_maps_are_loaded() {
    let fx = Fixture::new();
    fx.write("lang/en_US.lang", "option.BLOOM=Bloom\n");
    fx.write("lang/fr_fr.lang", "option.BLOOM=Flou lumineux\n");
    fx.write("item.properties", "item.1=diamond_sword\n");
    fx.write("block.properties", "block.8=water flowing_water\n");

    let pack = fx.load();
    let codes: Vec<_> = pack.language_map().keys().cloned().collect();
    assert_eq!(codes, vec!["en_us", "fr_fr"]);
    assert_eq!(pack.language_map()["en_us"].get("option.BLOOM"), Some("Bloom"));

    assert_eq!(pack.id_map().item_id(&"diamond_sword".parse().unwrap()), Some(1));
    assert_eq!(pack.id_map().block_count(), 2);
}

#[test]
fn test_custom_texture_is_loaded_with_sidecar_flags() {
    let fx = Fixture::new();
    fx.write("shaders.properties", "texture.noise=textures/noise.png\n");
    fx.write("textures/noise.png", [0x89u8, b'P', b'N', b'G']);
    fx.write("textures/noise.png.mcmeta", r#"{ "texture": { "blur": false, "clamp": true } }"#);

    let pack = fx.load();
    let texture = pack.custom_noise_texture().unwrap();
    assert_eq!(texture.content(), &[0x89, b'P', b'N', b'G']);
    assert!(!texture.blur());
    assert!(texture.clamp());
}

#[test]
fn test_unreadable_custom_texture_is_absent() {
    let fx = Fixture::new();
    fx.write("shaders.properties", "texture.noise=textures/missing.png\n");

    let pack = fx.load();
    assert_eq!(pack.properties().noise_texture_path(), Some("textures/missing.png"));
    assert!(pack.custom_noise_texture().is_none());
}

#[test]
fn test_escaping_custom_texture_is_absent() {
    let fx = Fixture::new();
    fx.write("shaders.properties", "texture.noise=../secret.bin\n");
    fs::write(fx.root.parent().unwrap().join("secret.bin"), "secret").unwrap();

    let pack = fx.load();
    assert!(pack.custom_noise_texture().is_none());
}

#[test]
fn test_option_defaults_persist_without_clobbering_user_values() {
    let fx = Fixture::new();
    fx.write("final.vsh", "#define SHADOW_QUALITY 2 // [1 2 4]\n#define BLOOM\n");
    fx.write("final.fsh", "//#define MOTION_BLUR\n");

    let pack = fx.load();
    assert_eq!(pack.options().len(), 3);
    assert_eq!(pack.config().get("SHADOW_QUALITY"), Some("2"));
    assert_eq!(pack.config().get("MOTION_BLUR"), Some("false"));

    let mut config = ShaderPackConfig::new("test pack", &fx.config_dir);
    config.load();
    assert_eq!(config.len(), 3);
    config.set("SHADOW_QUALITY", "4");
    config.save().unwrap();

    let pack = fx.load();
    assert_eq!(pack.config().get("SHADOW_QUALITY"), Some("4"));
    assert_eq!(
        pack.options().effective_value("SHADOW_QUALITY", pack.config()),
        Some("4")
    );
    assert_eq!(pack.config().get("BLOOM"), Some("true"));
}

#[test]
fn test_config_round_trip_through_the_pack() {
    let fx = Fixture::new();
    fx.write("final.vsh", "#define BLOOM\n");
    fx.write("final.fsh", "f");

    let mut pack = fx.load();
    pack.config_mut().set("CUSTOM", "yes");
    pack.config_mut().save().unwrap();

    let reloaded = fx.load();
    let before: Vec<_> = pack.config().iter().collect();
    let after: Vec<_> = reloaded.config().iter().collect();
    assert_eq!(before, after);
}

#[test]
fn test_config_save_failure_does_not_fail_the_pack() {
    let fx = Fixture::new();
    fx.program("", "final", "base");
    fs::write(&fx.config_dir, "a file where the config folder should be").unwrap();

    let pack = fx.load();
    assert_eq!(pack.program_set(ProgramContext::Base).len(), 1);
}
