use super::*;
use crate::model::{ColumnSpec, DatasetKind, Property, Value};

struct Canned(Result<String, ()>);

impl ListSource for Canned {
    fn list(&self, _request: &ListRequest) -> Result<String, FetchError> {
        match &self.0 {
            Ok(s) => Ok(s.clone()),
            Err(()) => Err(FetchError::Failed {
                binary: "zfs".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "permission denied".to_string(),
            }),
        }
    }
}

fn request() -> ListRequest {
    ListRequest::new(ColumnSpec::default(), None)
}

#[test]
fn request_args_append_type_and_root() {
    let req = ListRequest::new(
        ColumnSpec::parse("used,avail").expect("parse columns"),
        Some("tank/home".to_string()),
    );
    assert_eq!(
        req.args(),
        vec![
            "list",
            "-H",
            "-p",
            "-r",
            "-t",
            "all",
            "-o",
            "name,used,available,type",
            "tank/home"
        ]
    );
}

#[test]
fn parses_tab_separated_rows_and_classifies_them() {
    let out = "tank\t1024\t2048\t512\t/tank\tfilesystem\n\
               tank@daily\t0\t-\t512\t-\tsnapshot\n\
               tank/vol\t4096\t2048\t4096\t-\tvolume\n";
    let listing = parse_list_output(out, &ColumnSpec::default());

    assert!(listing.malformed.is_empty());
    assert_eq!(listing.records.len(), 3);
    assert_eq!(listing.records[0].kind, DatasetKind::Filesystem);
    assert_eq!(listing.records[1].kind, DatasetKind::Snapshot);
    assert_eq!(listing.records[1].parent_name(), Some("tank"));
    assert_eq!(listing.records[2].kind, DatasetKind::Volume);

    let used = &listing.records[0].cells[1];
    assert_eq!(used.value, Value::Size(Some(1024)));
    assert_eq!(used.display, "1.00K");
    assert_eq!(listing.records[1].cells[2].value, Value::Size(None));
    assert_eq!(listing.records[1].cells[2].display, "-");
}

#[test]
fn empty_mountpoint_field_keeps_column_alignment() {
    let out = "tank\t1\t2\t3\t\tfilesystem\n";
    let listing = parse_list_output(out, &ColumnSpec::default());
    assert_eq!(listing.records.len(), 1);
    assert_eq!(listing.records[0].cells[4].raw, "");
}

#[test]
fn malformed_rows_are_skipped_and_reported() {
    let out = "tank\t1\t2\t3\t/tank\tfilesystem\n\
               garbage\n\
               \n\
               tank/a\t1\t2\t3\t/tank/a\tfilesystem\n";
    let listing = parse_list_output(out, &ColumnSpec::default());
    assert_eq!(listing.records.len(), 2);
    assert_eq!(listing.malformed.len(), 1);
    assert_eq!(listing.malformed[0].line, 2);
    assert_eq!(listing.malformed[0].text, "garbage");
}

#[test]
fn whitespace_fallback_for_untabbed_lines() {
    let columns = ColumnSpec::parse("name,used").expect("parse columns");
    let listing = parse_list_output("pool/a   10G  filesystem\n", &columns);
    assert_eq!(listing.records.len(), 1);
    assert_eq!(listing.records[0].name(), "pool/a");
    assert_eq!(listing.records[0].cells[1].value, Value::Size(Some(10 << 30)));
}

#[test]
fn displayed_type_column_is_not_requested_twice() {
    let columns = ColumnSpec::parse("name,type,used").expect("parse columns");
    assert_eq!(columns.fetch_arg(), "name,type,used");
    let listing = parse_list_output("tank/v\tvolume\t1\n", &columns);
    assert_eq!(listing.records[0].kind, DatasetKind::Volume);
    assert_eq!(columns.get(1), Some(&Property::Type));
}

#[test]
fn fetch_surfaces_tool_failure() {
    let err = fetch(&Canned(Err(())), &request()).expect_err("fetch should fail");
    assert!(err.to_string().contains("permission denied"));
}

#[test]
fn fetch_rejects_empty_output() {
    let err = fetch(&Canned(Ok("\n".to_string())), &request()).expect_err("fetch should fail");
    assert!(matches!(err, FetchError::Empty));
}

#[test]
fn fetch_keeps_good_rows_next_to_bad_ones() {
    let out = "tank\t1\t2\t3\t/tank\tfilesystem\nbad row\n".to_string();
    let listing = fetch(&Canned(Ok(out)), &request()).expect("fetch");
    assert_eq!(listing.records.len(), 1);
    assert_eq!(listing.malformed.len(), 1);
}
