use appicon_gen::{generate_icons, Config, Variant};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "images" : [
    {
      "idiom" : "mac",
      "scale" : "1x",
      "size" : "16x16"
    },
    {
      "idiom" : "mac",
      "scale" : "2x",
      "size" : "16x16"
    }
  ],
  "info" : {
    "author" : "xcode",
    "version" : 1
  }
}
"#;

/// Lays out `<root>/PodcastAssistant/.../Contents.json` with the given manifest
fn create_project(root: &Path, manifest: &str) -> PathBuf {
    let config = Config::with_root(root, Variant::Normal);
    fs::create_dir_all(config.output_dir()).expect("Failed to create asset directory");
    fs::write(&config.manifest, manifest).expect("Failed to write manifest");
    config.manifest
}

fn png_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to list output directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    names.sort();
    names
}

fn assert_icon(path: &Path, size: u32) {
    let icon = image::open(path).expect("Failed to decode icon");
    assert_eq!(icon.width(), size, "{}", path.display());
    assert_eq!(icon.height(), size, "{}", path.display());
}

#[test]
fn test_normal_variant_writes_icons_and_annotates_manifest() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let manifest_path = create_project(temp_dir.path(), MANIFEST);
    let config = Config::with_root(temp_dir.path(), Variant::Normal);

    let summary = generate_icons(&config).expect("Normal generation failed");
    assert!(summary.manifest_updated);
    assert_eq!(summary.written.len(), 2);

    let asset_dir = config.output_dir();
    assert_eq!(png_names(&asset_dir), vec!["appicon-16.png", "appicon-32.png"]);
    assert_icon(&asset_dir.join("appicon-16.png"), 16);
    assert_icon(&asset_dir.join("appicon-32.png"), 32);

    let written = fs::read_to_string(&manifest_path).unwrap();
    assert!(written.ends_with("}\n"));
    let manifest: Value = serde_json::from_str(&written).unwrap();
    let images = manifest["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["filename"], "appicon-16.png");
    assert_eq!(images[1]["filename"], "appicon-32.png");
    assert_eq!(images[1]["idiom"], "mac");
    assert_eq!(manifest["info"]["author"], "xcode");
}

#[test]
fn test_transparent_variant_leaves_manifest_alone() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let manifest_path = create_project(temp_dir.path(), MANIFEST);
    let config = Config::with_root(temp_dir.path(), Variant::Transparent);

    let summary = generate_icons(&config).expect("Transparent generation failed");
    assert!(!summary.manifest_updated);

    let out_dir = temp_dir.path().join("docs/AppIconTransparent");
    assert_eq!(
        png_names(&out_dir),
        vec!["appicon-transparent-16.png", "appicon-transparent-32.png"]
    );
    let icon = image::open(out_dir.join("appicon-transparent-32.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(icon.get_pixel(0, 31)[3], 0, "corner should stay transparent");

    assert_eq!(fs::read_to_string(&manifest_path).unwrap(), MANIFEST);
    assert!(png_names(config.manifest.parent().unwrap()).is_empty());
}

#[test]
fn test_transparent_variant_writes_one_file_per_pixel_size() {
    let manifest = r#"{
  "images" : [
    { "size" : "16x16", "scale" : "2x" },
    { "size" : "32x32", "scale" : "1x" },
    { "size" : "32x32", "scale" : "2x" },
    { "size" : "64x64", "scale" : "1x" }
  ]
}"#;
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    create_project(temp_dir.path(), manifest);
    let config = Config::with_root(temp_dir.path(), Variant::Transparent);

    let summary = generate_icons(&config).unwrap();
    assert_eq!(summary.written.len(), 2);
    assert_eq!(
        png_names(&config.output_dir()),
        vec!["appicon-transparent-32.png", "appicon-transparent-64.png"]
    );
}

#[test]
fn test_normal_variant_annotates_every_duplicate_entry() {
    let manifest = r#"{
  "images" : [
    { "size" : "16x16", "scale" : "2x", "idiom" : "mac" },
    { "size" : "32x32", "scale" : "1x", "idiom" : "mac" }
  ]
}"#;
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let manifest_path = create_project(temp_dir.path(), manifest);
    let config = Config::with_root(temp_dir.path(), Variant::Normal);

    generate_icons(&config).unwrap();

    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    for entry in manifest["images"].as_array().unwrap() {
        assert_eq!(entry["filename"], "appicon-32.png");
    }
    assert_eq!(png_names(&config.output_dir()), vec!["appicon-32.png"]);
}

#[test]
fn test_malformed_size_renders_single_pixel_icon() {
    let manifest = r#"{
  "images" : [
    { "size" : "badx0", "scale" : "1x" },
    { "size" : "16x16", "scale" : "1x" }
  ]
}"#;
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let manifest_path = create_project(temp_dir.path(), manifest);
    let config = Config::with_root(temp_dir.path(), Variant::Normal);

    generate_icons(&config).expect("Malformed size should not abort the run");

    assert_icon(&config.output_dir().join("appicon-1.png"), 1);
    assert_icon(&config.output_dir().join("appicon-16.png"), 16);
    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["images"][0]["filename"], "appicon-1.png");
    assert_eq!(manifest["images"][0]["size"], "badx0");
}

#[test]
fn test_loose_info_block_does_not_abort_the_run() {
    for info in [r#"{ "version" : 1 }"#, r#"{ "author" : "xcode", "version" : "1" }"#] {
        let manifest = format!(
            r#"{{
  "info" : {info},
  "images" : [ {{ "size" : "16x16", "scale" : "1x" }} ]
}}"#
        );
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let manifest_path = create_project(temp_dir.path(), &manifest);
        let config = Config::with_root(temp_dir.path(), Variant::Normal);

        generate_icons(&config).expect("Loose info block should not abort the run");

        assert_icon(&config.output_dir().join("appicon-16.png"), 16);
        let written = fs::read_to_string(&manifest_path).unwrap();
        let after: Value = serde_json::from_str(&written).unwrap();
        let expected: Value = serde_json::from_str(info).unwrap();
        assert_eq!(after["info"], expected);
        assert_eq!(after["images"][0]["filename"], "appicon-16.png");
        // info still comes first
        assert!(written.find("\"info\"").unwrap() < written.find("\"images\"").unwrap());
    }
}

#[test]
fn test_oversized_entry_fails_before_writing() {
    let manifest = r#"{
  "images" : [
    { "size" : "16x16", "scale" : "1x" },
    { "size" : "1e10x1e10", "scale" : "1x" }
  ]
}"#;
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let manifest_path = create_project(temp_dir.path(), manifest);
    let config = Config::with_root(temp_dir.path(), Variant::Normal);

    let err = generate_icons(&config).unwrap_err();
    assert!(format!("{err:#}").contains("limit"), "{err:#}");
    assert!(png_names(&config.output_dir()).is_empty());
    assert_eq!(fs::read_to_string(&manifest_path).unwrap(), manifest);

    let transparent = Config::with_root(temp_dir.path(), Variant::Transparent);
    assert!(generate_icons(&transparent).is_err());
    assert!(!transparent.output_dir().exists());
}

#[test]
fn test_missing_manifest_is_fatal() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = Config::with_root(temp_dir.path(), Variant::Transparent);

    let err = generate_icons(&config).unwrap_err();
    assert!(format!("{err:#}").contains("Contents.json"));
    assert!(!temp_dir.path().join("docs").exists());
}

#[test]
fn test_cli_renders_into_custom_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let manifest_path = temp_dir.path().join("Contents.json");
    fs::write(&manifest_path, MANIFEST).unwrap();
    let out_dir = temp_dir.path().join("export");

    let output = Command::new(env!("CARGO_BIN_EXE_appicon-gen"))
        .arg("--variant")
        .arg("transparent")
        .arg("--manifest")
        .arg(&manifest_path)
        .arg("--transparent-dir")
        .arg(&out_dir)
        .output()
        .expect("Failed to run appicon-gen");

    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("appicon-gen failed with {}", output.status);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Saved appicon-transparent-16.png (16px)"));
    assert_eq!(
        png_names(&out_dir),
        vec!["appicon-transparent-16.png", "appicon-transparent-32.png"]
    );
}

#[test]
fn test_cli_rejects_unknown_variant() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    create_project(temp_dir.path(), MANIFEST);

    let output = Command::new(env!("CARGO_BIN_EXE_appicon-gen"))
        .arg("--variant")
        .arg("sepia")
        .arg("--root")
        .arg(temp_dir.path())
        .output()
        .expect("Failed to run appicon-gen");

    assert!(!output.status.success());
    let asset_dir = Config::with_root(temp_dir.path(), Variant::Normal).output_dir();
    assert!(png_names(&asset_dir).is_empty());
    assert!(!temp_dir.path().join("docs").exists());
}
