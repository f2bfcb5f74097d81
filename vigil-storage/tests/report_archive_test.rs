//! Report archive tests.

use chrono::NaiveDate;
use tempfile::TempDir;
use vigil_storage::ReportArchive;

#[test]
fn reports_are_date_named_and_isolated() {
    let dir = TempDir::new().unwrap();
    let archive = ReportArchive::new(dir.path().join("reports"));
    let monday = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2026, 6, 2).unwrap();

    let path = archive.write(monday, "# monday v1").unwrap();
    assert!(path.ends_with("health-2026-06-01.md"));
    archive.write(tuesday, "# tuesday").unwrap();
    archive.write(monday, "# monday v2").unwrap();

    assert_eq!(archive.read(monday).unwrap().as_deref(), Some("# monday v2"));
    assert_eq!(archive.read(tuesday).unwrap().as_deref(), Some("# tuesday"));
    assert_eq!(std::fs::read_dir(archive.dir()).unwrap().count(), 2);
}

#[test]
fn missing_report_reads_as_none() {
    let dir = TempDir::new().unwrap();
    let archive = ReportArchive::new(dir.path());
    let date = NaiveDate::from_ymd_opt(2026, 6, 3).unwrap();
    assert!(archive.read(date).unwrap().is_none());
}
