//! Report file naming and writing

use anyhow::Context;
use chrono::{DateTime, TimeZone};
use scout_agent::Mode;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

/// `report_{mode}_{YYYY_MM_DD_HH_MM_SS}.md`
pub fn report_filename<Tz>(mode: Mode, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("report_{}_{}.md", mode, now.format("%Y_%m_%d_%H_%M_%S"))
}

/// Explicit output file, or a timestamped report in `working_dir`
pub fn output_path<Tz>(
    working_dir: &Path,
    output_file: Option<&Path>,
    mode: Mode,
    now: &DateTime<Tz>,
) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match output_file {
        Some(path) => path.to_path_buf(),
        None => working_dir.join(report_filename(mode, now)),
    }
}

pub fn write_report(path: &Path, text: &str) -> anyhow::Result<()> {
    fs::write(path, text).with_context(|| format!("failed to write report {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_report_filename() {
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(
            report_filename(Mode::Mermaid, &now),
            "report_mermaid_2025_03_07_09_05_02.md"
        );
    }

    #[test]
    fn test_output_path() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let root = Path::new("/work/project");

        assert_eq!(
            output_path(root, None, Mode::Docs, &now),
            root.join("report_docs_2025_12_31_23_59_59.md")
        );
        assert_eq!(
            output_path(root, Some(Path::new("README.md")), Mode::Docs, &now),
            PathBuf::from("README.md")
        );
    }

    #[test]
    fn test_write_report() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.md");

        write_report(&path, "# Report\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Report\n");

        let missing = temp.path().join("no/such/dir/report.md");
        let err = write_report(&missing, "x").unwrap_err();
        assert!(err.to_string().contains("failed to write report"));
    }
}
