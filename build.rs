use std::env;
use std::fs;
use std::path::Path;

// Bakes the package name, version and description from Cargo.toml into the
// binary so the CLI banner never drifts from the manifest.
fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let manifest_path = Path::new(&manifest_dir).join("Cargo.toml");
    println!("cargo:rerun-if-changed={}", manifest_path.display());

    let manifest: toml::Value = fs::read_to_string(&manifest_path)
        .map_err(|e| format!("reading {}: {e}", manifest_path.display()))
        .and_then(|raw| toml::from_str(&raw).map_err(|e| format!("parsing Cargo.toml: {e}")))
        .unwrap_or_else(|e| panic!("{e}"));
    let package = manifest
        .get("package")
        .and_then(toml::Value::as_table)
        .expect("Cargo.toml has no [package] table");
    let field = |key: &str| {
        package
            .get(key)
            .and_then(toml::Value::as_str)
            .unwrap_or_default()
    };

    let generated = format!(
        "pub const PKG_NAME: &str = {:?};\n\
         pub const PKG_VERSION: &str = {:?};\n\
         pub const PKG_DESCRIPTION: &str = {:?};\n",
        field("name"),
        field("version"),
        field("description"),
    );

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    fs::write(Path::new(&out_dir).join("pkg_info.rs"), generated).expect("writing pkg_info.rs");
}
