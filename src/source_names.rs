/// Centralized snapshot source naming
///
/// Keeps the file name and panel title of each snapshot category in one place
/// so the reader, the text dump and the panel image agree.

/// A snapshot sensor category, rendered as one text panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Pose,
    Science,
    Misc,
}

/// All snapshot sources in display order.
pub const SNAPSHOT_SOURCES: [SnapshotSource; 3] = [
    SnapshotSource::Pose,
    SnapshotSource::Science,
    SnapshotSource::Misc,
];

impl SnapshotSource {
    /// File written by the ground-station pipeline for this category.
    pub fn file_name(self) -> &'static str {
        match self {
            SnapshotSource::Pose => "pose_data.json",
            SnapshotSource::Science => "science_data.json",
            SnapshotSource::Misc => "misc_data.json",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SnapshotSource::Pose => "Pose Data",
            SnapshotSource::Science => "Science Data",
            SnapshotSource::Misc => "Misc Data",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(SnapshotSource::Pose.file_name(), "pose_data.json");
        assert_eq!(SnapshotSource::Science.file_name(), "science_data.json");
        assert_eq!(SnapshotSource::Misc.file_name(), "misc_data.json");
    }

    #[test]
    fn test_display_order() {
        let titles: Vec<&str> = SNAPSHOT_SOURCES.iter().map(|s| s.title()).collect();
        assert_eq!(titles, ["Pose Data", "Science Data", "Misc Data"]);
    }
}
