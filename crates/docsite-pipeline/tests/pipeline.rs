//! End-to-end pipeline tests against stub generators.
//!
//! The stubs are small shell scripts placed on an injected search path. The
//! pdoc stub writes HTML into the requested output directory; the mkdocs stub
//! assembles a fake site and records whether `docs/api` was populated at the
//! moment it ran, which pins down the relocate-before-build ordering.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use docsite_pipeline::{Pipeline, PipelineError, PipelineOptions, Toolchain};

/// pdoc stub: `pdoc --html --output-dir DIR PACKAGE`.
const PDOC_STUB: &str = r#"#!/bin/sh
out=""
while [ $# -gt 1 ]; do
    if [ "$1" = "--output-dir" ]; then
        out="$2"
        shift
    fi
    shift
done
pkg="$1"
mkdir -p "$out/$pkg"
printf '<html>api reference</html>\n' > "$out/$pkg/index.html"
printf '<html>submodule</html>\n' > "$out/$pkg/utils.html"
"#;

/// mkdocs stub: `mkdocs build --config-file FILE --site-dir DIR`.
///
/// Runs from the package root, so a relative `docs/api` check observes
/// exactly what the real tool would.
const MKDOCS_STUB: &str = r#"#!/bin/sh
site=""
while [ $# -gt 1 ]; do
    if [ "$1" = "--site-dir" ]; then
        site="$2"
        shift
    fi
    shift
done
mkdir -p "$site"
printf '<html>site</html>\n' > "$site/index.html"
if [ -f docs/api/index.html ]; then
    : > "$site/api-observed"
fi
"#;

fn write_stub(bin_dir: &Path, name: &str, script: &str) {
    let path = bin_dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

struct Fixture {
    _root: tempfile::TempDir,
    package_root: PathBuf,
    bin_dir: PathBuf,
}

impl Fixture {
    /// A package tree with an mkdocs config, plus a bin dir holding both
    /// generator stubs.
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let package_root = root.path().join("rlxnix");
        fs::create_dir_all(&package_root).unwrap();
        fs::write(package_root.join("mkdocs.yml"), "site_name: rlxnix\n").unwrap();

        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&bin_dir).unwrap();
        write_stub(&bin_dir, "pdoc", PDOC_STUB);
        write_stub(&bin_dir, "mkdocs", MKDOCS_STUB);

        Self {
            _root: root,
            package_root,
            bin_dir,
        }
    }

    fn pipeline(&self) -> Pipeline {
        Pipeline::new(PipelineOptions::new(&self.package_root, "rlxnix"))
            .with_toolchain(Toolchain::with_search_path(&self.bin_dir))
    }

    fn site_dir(&self) -> PathBuf {
        self.package_root.join("site")
    }

    fn api_dir(&self) -> PathBuf {
        self.package_root.join("docs/api")
    }
}

#[test]
fn fresh_build_produces_site_and_api_docs() {
    let fixture = Fixture::new();

    let report = fixture.pipeline().run().unwrap();

    assert!(fixture.site_dir().join("index.html").is_file());
    assert!(fixture.api_dir().join("index.html").is_file());
    assert!(fixture.api_dir().join("utils.html").is_file());
    assert!(report.url().contains("site/index.html"));
}

#[test]
fn site_builder_observes_relocated_api_docs() {
    let fixture = Fixture::new();

    fixture.pipeline().run().unwrap();

    // Written by the mkdocs stub only if docs/api was populated when it ran.
    assert!(fixture.site_dir().join("api-observed").is_file());
}

#[test]
fn temporary_wrapper_is_removed_after_a_successful_run() {
    let fixture = Fixture::new();

    fixture.pipeline().run().unwrap();

    assert!(!fixture.site_dir().join(".apidoc").exists());
    let entries: Vec<_> = fs::read_dir(&fixture.package_root)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert!(entries.contains(&"site".into()));
    assert!(entries.contains(&"docs".into()));
}

#[test]
fn stale_site_content_does_not_survive_a_rebuild() {
    let fixture = Fixture::new();
    let stale = fixture.site_dir().join("stale.html");
    fs::create_dir_all(fixture.site_dir()).unwrap();
    fs::write(&stale, "left over from a previous run").unwrap();

    fixture.pipeline().run().unwrap();

    assert!(!stale.exists());
    assert!(fixture.site_dir().join("index.html").is_file());
}

#[test]
fn two_consecutive_runs_leave_only_the_second_run_output() {
    let fixture = Fixture::new();

    fixture.pipeline().run().unwrap();
    let marker = fixture.site_dir().join("first-run-marker");
    fs::write(&marker, "").unwrap();

    fixture.pipeline().run().unwrap();

    assert!(!marker.exists());
    assert!(fixture.site_dir().join("index.html").is_file());
}

#[test]
fn missing_tool_aborts_with_zero_filesystem_mutation() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.bin_dir.join("mkdocs")).unwrap();

    let stale = fixture.site_dir().join("stale.html");
    fs::create_dir_all(fixture.site_dir()).unwrap();
    fs::write(&stale, "untouched").unwrap();

    let err = fixture.pipeline().run().unwrap_err();

    assert!(matches!(
        &err,
        PipelineError::MissingTool { program, .. } if program == "mkdocs"
    ));
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("pip3 install mkdocs"));
    // The pre-existing site directory was neither removed nor rebuilt.
    assert!(stale.exists());
    assert!(!fixture.api_dir().exists());
}

#[test]
fn failing_generator_propagates_its_exit_status() {
    let fixture = Fixture::new();
    write_stub(&fixture.bin_dir, "pdoc", "#!/bin/sh\nexit 3\n");

    let err = fixture.pipeline().run().unwrap_err();

    assert!(matches!(
        &err,
        PipelineError::ToolFailed { program, .. } if program == "pdoc"
    ));
    assert_eq!(err.exit_code(), 3);
    // No cleanup: the reset site directory is left in place for inspection.
    assert!(fixture.site_dir().is_dir());
}

#[test]
fn generator_without_output_is_reported() {
    let fixture = Fixture::new();
    // A pdoc stub that succeeds but writes nothing.
    write_stub(&fixture.bin_dir, "pdoc", "#!/bin/sh\nexit 0\n");

    let err = fixture.pipeline().run().unwrap_err();
    assert!(matches!(err, PipelineError::MissingApiOutput(_)));
}

#[test]
fn configured_tool_names_are_honored() {
    let fixture = Fixture::new();
    write_stub(&fixture.bin_dir, "pdoc3", PDOC_STUB);
    fs::remove_file(fixture.bin_dir.join("pdoc")).unwrap();

    let mut options = PipelineOptions::new(&fixture.package_root, "rlxnix");
    options.apidoc_program = "pdoc3".to_owned();
    let pipeline =
        Pipeline::new(options).with_toolchain(Toolchain::with_search_path(&fixture.bin_dir));

    pipeline.run().unwrap();
    assert!(fixture.api_dir().join("index.html").is_file());
}
