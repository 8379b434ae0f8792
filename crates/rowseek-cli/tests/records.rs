//! Loading CSV files from disk and running them through the engine.

use std::fs;
use std::path::PathBuf;

use rowseek::{Dir, SortState};
use rowseek_cli::{build_rows, load_records, render_text, Record, PAGE_LIMIT};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_records_and_skips_header() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "dde.csv", "id,dde\n123, 0.5\n124,-1.25\n");

    let set = load_records(&path).unwrap();
    assert_eq!(set.name, "dde");
    assert_eq!(
        set.records,
        vec![Record::new("123", "0.5"), Record::new("124", "-1.25")]
    );
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_records(dir.path().join("absent.csv")).unwrap_err();
    assert!(err.to_string().contains("cannot open"));
}

#[test]
fn short_line_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "bad.csv", "id,dde\n123,0.5\n124\n");
    let err = load_records(&path).unwrap_err();
    assert!(err.to_string().contains("expected `id,value`"), "{}", err);
}

#[test]
fn merged_files_filter_and_sort() {
    let dir = TempDir::new().unwrap();
    let dde = write_csv(
        &dir,
        "dde.csv",
        "id,dde\n1,0.52\n2,-3.75\n3,8.0\n4,0.1\n5,2.0\n",
    );
    let rmsd = write_csv(&dir, "rmsd.csv", "id,rmsd\n1,1.1\n2,0.2\n3,7.9\n4,0.4\n");

    let sets = vec![load_records(&dde).unwrap(), load_records(&rmsd).unwrap()];
    let mut table = build_rows(&sets);
    assert_eq!(table.names(), ["dde", "rmsd"]);
    // id 5 has no rmsd value
    assert_eq!(table.len(), 4);

    table.apply_query("|$1 - $2| < 0.75").unwrap();
    let visible: Vec<&str> = table.visible().map(|row| row.label()).collect();
    assert_eq!(visible, ["1", "3", "4"]);

    let mut state = SortState::new();
    table.sort_by_column(1, &mut state);
    assert_eq!(state.dir(), Dir::Asc);
    let order: Vec<&str> = table.rows().iter().map(|row| row.label()).collect();
    assert_eq!(order, ["4", "1", "2", "3"]);
}

#[test]
fn rendered_view_lists_visible_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "dde.csv", "id,dde\na,1\nb,-2\nc,3\n");
    let mut table = build_rows(&[load_records(&path).unwrap()]);
    table.apply_query("$1 > 0").unwrap();

    console::set_colors_enabled(false);
    let out = render_text(&table, PAGE_LIMIT);
    assert!(out.starts_with("id  dde"));
    assert!(out.contains("a   1.000000"));
    assert!(!out.contains("b "));
    assert!(out.trim_end().ends_with("2 of 3 rows"));
}
