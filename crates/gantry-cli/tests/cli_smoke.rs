use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("projects").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn gantry(store: &Path) -> Command {
    let exe = assert_cmd::cargo_bin!("gantry-cli");
    let mut cmd = Command::new(exe);
    cmd.env_remove("GANTRY_LOG")
        .args(["--store", store.to_string_lossy().as_ref()]);
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run gantry-cli");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn import_roadmap(store: &Path) {
    let roadmap = fixture("roadmap.json");
    gantry(store)
        .args(["import", roadmap.to_string_lossy().as_ref()])
        .assert()
        .success();
}

#[test]
fn add_then_list_round_trips_through_the_store() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");

    let added = stdout_json(gantry(&store).args([
        "add",
        "--name",
        "Design",
        "--type",
        "milestone",
        "--start",
        "2025-01-03",
        "--end",
        "2025-01-05",
        "--color",
        "#ff8800",
    ]));
    assert_eq!(added["id"], 1);
    assert_eq!(added["type"], "milestone");

    let listed = stdout_json(gantry(&store).arg("list"));
    let projects = listed.as_array().expect("array");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "Design");
    assert_eq!(projects[0]["startDate"], "2025-01-03");
    assert_eq!(projects[0]["endDate"], "2025-01-05");
    assert_eq!(projects[0]["color"], "#ff8800");

    let raw = fs::read_to_string(&store).expect("read store");
    assert!(raw.contains("gantt-projects"));
}

#[test]
fn add_without_dates_uses_the_one_week_default() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");

    let added = stdout_json(gantry(&store).args([
        "add",
        "--name",
        "Kickoff",
        "--today",
        "2025-03-10",
    ]));
    assert_eq!(added["startDate"], "2025-03-10");
    assert_eq!(added["endDate"], "2025-03-17");
}

#[test]
fn invalid_drafts_are_rejected_with_exit_code_1() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");

    let output = gantry(&store)
        .args([
            "add",
            "--name",
            "Backwards",
            "--start",
            "2025-01-10",
            "--end",
            "2025-01-01",
        ])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("End date cannot be earlier than start date"), "{stderr}");
    assert!(!store.exists(), "nothing should be written on failure");
}

#[test]
fn edit_can_clear_one_date_and_remove_deletes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");
    import_roadmap(&store);

    let edited = stdout_json(gantry(&store).args(["edit", "1", "--end", "", "--name", "Refresh"]));
    assert_eq!(edited["name"], "Refresh");
    assert_eq!(edited["startDate"], "2025-01-03");
    assert!(edited["endDate"].is_null() || edited["endDate"] == "");

    gantry(&store).args(["remove", "2"]).assert().success();
    let listed = stdout_json(gantry(&store).arg("list"));
    let ids: Vec<u64> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![1, 3]);

    let output = gantry(&store).args(["remove", "42"]).output().expect("run");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn import_export_and_stats() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");
    import_roadmap(&store);

    let stats = stdout_json(gantry(&store).arg("stats"));
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["planned"], 1);
    assert_eq!(stats["unplanned"], 2);

    let out = tmp.path().join("export.json");
    gantry(&store)
        .args(["export", "--out", out.to_string_lossy().as_ref()])
        .assert()
        .success();
    let exported: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read export"))
        .expect("export is JSON");
    let items = exported.as_array().expect("array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["start"], "2025-01-03");
    assert_eq!(items[2]["end"], "2025-03-31");

    // Appending the same document doubles the list with fresh ids.
    gantry(&store)
        .args(["import", "--append", out.to_string_lossy().as_ref()])
        .assert()
        .success();
    let listed = stdout_json(gantry(&store).arg("list"));
    let ids: Vec<u64> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn bad_import_leaves_the_store_untouched() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");
    import_roadmap(&store);
    let before = fs::read_to_string(&store).expect("read store");

    let bad = fixture("invalid_missing_dates.json");
    let output = gantry(&store)
        .args(["import", bad.to_string_lossy().as_ref()])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to import projects"), "{stderr}");
    assert_eq!(fs::read_to_string(&store).expect("read store"), before);
}

#[test]
fn export_of_an_empty_store_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");

    let output = gantry(&store).arg("export").output().expect("run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No projects to export"));
}

#[test]
fn layout_reports_pixel_and_percentage_geometry() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");
    import_roadmap(&store);

    let layout = stdout_json(gantry(&store).args([
        "layout",
        "--view",
        "month",
        "--today",
        "2025-01-10",
        "--zoom",
        "1.5",
    ]));
    assert_eq!(layout["view_mode"], "month");
    assert_eq!(layout["rows"].as_array().map(Vec::len), Some(3));
    assert_eq!(layout["columns"].as_array().map(Vec::len), Some(6));

    let raw = stdout_json(gantry(&store).args([
        "layout", "--raw", "--view", "month", "--today", "2025-01-10",
    ]));
    assert_eq!(raw["viewMode"], "month");
    assert_eq!(raw["span"]["min"], "2024-12-04");
    assert_eq!(raw["span"]["max"], "2025-05-30");
    let bars = raw["bars"].as_array().expect("bars");
    assert_eq!(bars.len(), 3);
    // Open-ended backward bars start at the left edge.
    assert_eq!(bars[2]["position"]["left"], 0.0);
}

#[test]
fn render_svg_to_stdout_uses_store_preferences() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");
    import_roadmap(&store);
    gantry(&store).args(["set", "language", "zh"]).assert().success();

    let output = gantry(&store)
        .args(["render", "--today", "2025-01-10", "--id", "road map"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf8");
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"id="road-map""#));
    assert!(svg.contains("项目时间线"));
    assert_eq!(svg.matches(r#"data-project-id=""#).count(), 3);

    let output = gantry(&store)
        .args(["render", "--today", "2025-01-10", "--lang", "en", "--theme", "dark"])
        .output()
        .expect("run");
    let svg = String::from_utf8(output.stdout).expect("utf8");
    assert!(svg.contains("Project Timeline"));
    assert!(svg.contains(gantry::Theme::Dark.palette().background));
}

#[test]
fn render_png_writes_a_png() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");
    import_roadmap(&store);
    let out = tmp.path().join("chart.png");

    gantry(&store)
        .args([
            "render",
            "--format",
            "png",
            "--scale",
            "1",
            "--background",
            "white",
            "--today",
            "2025-01-10",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "output is not a PNG");
}

#[test]
fn render_png_defaults_to_a_dated_file_name() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");
    import_roadmap(&store);

    gantry(&store)
        .current_dir(tmp.path())
        .args(["render", "--format", "png", "--scale", "1", "--today", "2025-01-10"])
        .assert()
        .success();

    let expected = tmp.path().join("gantt-chart-2025-01-10.png");
    assert!(expected.exists(), "missing {}", expected.display());
}

#[test]
fn usage_errors_exit_with_code_2() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");

    for args in [
        vec!["frobnicate"],
        vec!["render", "--view", "year"],
        vec!["list", "--bogus"],
        vec!["edit"],
        vec!["set", "theme"],
        vec![],
    ] {
        let output = gantry(&store).args(&args).output().expect("run");
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        assert!(String::from_utf8_lossy(&output.stderr).contains("USAGE"), "{args:?}");
    }
}

#[test]
fn set_rejects_unknown_themes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");

    gantry(&store).args(["set", "theme", "green"]).assert().success();
    let raw: Value = serde_json::from_str(&fs::read_to_string(&store).expect("read store"))
        .expect("store is JSON");
    assert_eq!(raw["gantt-theme"], "green");

    let output = gantry(&store).args(["set", "theme", "neon"]).output().expect("run");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn config_files_layer_in_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = tmp.path().join("store.json");
    let base = tmp.path().join("base.json");
    let local = tmp.path().join("local.json");
    fs::write(
        &base,
        r#"{ "viewMode": "week", "timeline": { "defaultWindowDays": 30 } }"#,
    )
    .expect("write base");
    fs::write(&local, r#"{ "viewMode": "day", "timeline": { "defaultWindowDays": 6 } }"#)
        .expect("write local");

    let raw = stdout_json(gantry(&store).args([
        "--config",
        base.to_string_lossy().as_ref(),
        "--config",
        local.to_string_lossy().as_ref(),
        "layout",
        "--raw",
        "--today",
        "2025-01-01",
    ]));
    assert_eq!(raw["viewMode"], "day");
    assert_eq!(raw["buckets"].as_array().map(Vec::len), Some(7));
    assert_eq!(raw["span"]["max"], "2025-01-07");
}
