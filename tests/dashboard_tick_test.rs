// tests/dashboard_tick_test.rs

use serde_json::json;
use std::fs;
use std::path::Path;

use groundstation_dashboard::config::DashboardConfig;
use groundstation_dashboard::constants::PANELS_TEXT_FILE;
use groundstation_dashboard::dashboard::Dashboard;
use groundstation_dashboard::data_input::wod::WodChannel;

fn write_json(dir: &Path, name: &str, value: serde_json::Value) {
    fs::write(dir.join(name), value.to_string()).unwrap();
}

fn populate(data_dir: &Path) {
    fs::create_dir_all(data_dir).unwrap();
    write_json(
        data_dir,
        "pose_data.json",
        json!([
            {"x": 0.0, "y": 0.0, "z": 0.0},
            {"x": 6771.2, "y": -12.5, "z": 3.25}
        ]),
    );
    write_json(
        data_dir,
        "science_data.json",
        json!([{"sensor": "lidar", "debris_count": 2}]),
    );
    // misc_data.json is half-written.
    fs::write(data_dir.join("misc_data.json"), "[{\"uptime\": 1").unwrap();

    write_json(
        data_dir,
        "wod_data.json",
        json!([
            [{"batt_voltage": 6.0}],
            [
                {"batt_voltage": 7.4, "batt_current": -110, "current_3v3": 80, "current_5v": 140,
                 "temp_comm": 18.0, "temp_eps": 21.0, "temp_battery": 15.5},
                {"batt_voltage": 7.3, "batt_current": -95, "current_3v3": 82, "current_5v": 138,
                 "temp_comm": 18.5, "temp_eps": 21.5, "temp_battery": 16.0},
                {"batt_voltage": 7.3, "batt_current": -90, "current_3v3": 79,
                 "temp_comm": 19.0, "temp_eps": 22.0, "temp_battery": 16.5}
            ]
        ]),
    );

    let mut grid = vec![vec![4.0; 8]; 8];
    grid[2][5] = 0.8;
    write_json(
        data_dir,
        "lidar_data.json",
        json!([
            {"label": 41, "distances": vec![vec![5.0; 8]; 8]},
            {"label": 42, "distances": grid}
        ]),
    );
    write_json(
        data_dir,
        "debris_data.json",
        json!([
            {"label": 41, "blobs": [[0, 0]]},
            {"label": 42, "blobs": [[2, 5]]}
        ]),
    );
}

fn dashboard_for(root: &Path) -> Dashboard {
    Dashboard::new(DashboardConfig {
        data_dir: root.join("data"),
        output_dir: root.join("out"),
        interval_ms: 50,
        max_ticks: Some(1),
    })
    .unwrap()
}

#[test]
fn test_tick_reads_latest_entries() {
    let root = tempfile::tempdir().unwrap();
    populate(&root.path().join("data"));
    let mut dashboard = dashboard_for(root.path());

    let report = dashboard.tick();
    assert_eq!(report.tick, 1);
    assert_eq!(report.panels_available(), 2);

    let wod = report.sources.wod.as_ref().unwrap();
    assert_eq!(wod.samples.len(), 3);
    assert_eq!(wod.series(WodChannel::Current5v), vec![(0.0, 140.0), (1.0, 138.0)]);

    let lidar = report.sources.lidar.as_ref().unwrap();
    assert_eq!(lidar.label, 42);
    assert_eq!(lidar.blobs, vec![(2, 5)]);
    assert_eq!(lidar.value_range(), Some((0.8, 4.0)));

    let text = fs::read_to_string(root.path().join("out").join(PANELS_TEXT_FILE)).unwrap();
    assert_eq!(
        text,
        "Pose Data\nx: 6771.2\ny: -12.5\nz: 3.25\n\n\
         Science Data\nsensor: lidar\ndebris_count: 2\n\n\
         Misc Data\nNo data available\n"
    );
    assert!(report
        .artifacts
        .contains(&root.path().join("out").join(PANELS_TEXT_FILE)));
}

#[test]
fn test_tick_without_data_degrades_to_placeholders() {
    let root = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard_for(root.path());

    let report = dashboard.tick();
    assert_eq!(report.panels_available(), 0);
    assert!(report.sources.wod.is_err());
    assert!(report.sources.lidar.is_err());

    let text = fs::read_to_string(root.path().join("out").join(PANELS_TEXT_FILE)).unwrap();
    assert_eq!(
        text,
        "Pose Data\nNo data available\n\n\
         Science Data\nNo data available\n\n\
         Misc Data\nNo data available\n"
    );
}

#[test]
fn test_each_tick_rereads_files() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    populate(&data_dir);
    let mut dashboard = dashboard_for(root.path());

    dashboard.tick();
    fs::remove_file(data_dir.join("pose_data.json")).unwrap();
    write_json(&data_dir, "misc_data.json", json!([{"uptime": 3600}]));

    let report = dashboard.tick();
    assert_eq!(report.tick, 2);
    let titles_available: Vec<(&str, bool)> = report
        .sources
        .panels
        .iter()
        .map(|p| (p.title.as_str(), p.available))
        .collect();
    assert_eq!(
        titles_available,
        [("Pose Data", false), ("Science Data", true), ("Misc Data", true)]
    );
}
