// src/plot_functions/plot_text_panels.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{PANELS_IMAGE_FILE, PANELS_TEXT_FILE};
use crate::data_input::snapshot::SnapshotPanel;
use crate::plot_framework::{draw_text_panels, TextPanel};
use crate::types::RenderResult;

/// Renders the panels as plain text: title, one line per field, blank line between panels.
pub fn format_panels_text(panels: &[SnapshotPanel]) -> String {
    panels
        .iter()
        .map(|panel| {
            let mut block = panel.title.clone();
            for line in &panel.lines {
                block.push('\n');
                block.push_str(line);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
        + "\n"
}

/// Writes `panels.txt` into `output_dir`.
pub fn write_panels_text(panels: &[SnapshotPanel], output_dir: &Path) -> io::Result<PathBuf> {
    let output_file = output_dir.join(PANELS_TEXT_FILE);
    fs::write(&output_file, format_panels_text(panels))?;
    info!("Panel text saved as '{}'.", output_file.display());
    Ok(output_file)
}

/// Draws the snapshot panels side by side into `panels.png`.
pub fn plot_text_panels(
    panels: &[SnapshotPanel],
    output_dir: &Path,
) -> RenderResult {
    let output_file = output_dir.join(PANELS_IMAGE_FILE);
    let text_panels: Vec<TextPanel> = panels
        .iter()
        .map(|panel| TextPanel {
            title: panel.title.clone(),
            lines: panel.lines.clone(),
        })
        .collect();

    draw_text_panels(&output_file, "Latest Snapshots", &text_panels)?;
    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_names::SnapshotSource;

    #[test]
    fn test_text_layout() {
        let panels = vec![
            SnapshotPanel {
                title: "Pose Data".to_string(),
                lines: vec!["roll: 1".to_string(), "pitch: 2".to_string()],
                available: true,
            },
            SnapshotPanel::placeholder(SnapshotSource::Misc),
        ];

        assert_eq!(
            format_panels_text(&panels),
            "Pose Data\nroll: 1\npitch: 2\n\nMisc Data\nNo data available\n"
        );
    }

    #[test]
    fn test_text_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let panels = vec![SnapshotPanel::placeholder(SnapshotSource::Science)];

        fs::write(dir.path().join(PANELS_TEXT_FILE), "stale").unwrap();
        let path = write_panels_text(&panels, dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "Science Data\nNo data available\n"
        );
    }
}

// src/plot_functions/plot_text_panels.rs
