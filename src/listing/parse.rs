use crate::model::{ColumnSpec, DatasetKind, Record};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedRow {
    /// 1-based line number in the tool output.
    pub line: usize,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Listing {
    pub records: Vec<Record>,
    pub malformed: Vec<MalformedRow>,
}

/// Split `zfs list -H` output into records.
///
/// Fields are tab separated; a line without tabs falls back to whitespace
/// splitting so hand-written or non-`-H` fixtures still parse. Rows whose
/// field count does not match the request are skipped.
pub fn parse_list_output(text: &str, columns: &ColumnSpec) -> Listing {
    let expected = columns.fetch_properties().len();
    let type_idx = columns.type_index();
    let mut out = Listing::default();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = if line.contains('\t') {
            line.split('\t').collect()
        } else {
            line.split_whitespace().collect()
        };
        if fields.len() != expected {
            out.malformed.push(MalformedRow {
                line: i + 1,
                text: line.to_string(),
            });
            continue;
        }

        let kind = DatasetKind::classify(fields[0].trim(), fields.get(type_idx).copied());
        out.records.push(Record::decode(
            columns.columns(),
            &fields[..columns.len()],
            kind,
        ));
    }

    out
}
