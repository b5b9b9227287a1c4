use std::sync::OnceLock;

use time::OffsetDateTime;
use time::format_description::FormatItem;

use super::property::{Property, PropertyKind};
use super::size::{decode_size, human_readable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetKind {
    Filesystem,
    Volume,
    Snapshot,
    Bookmark,
}

impl DatasetKind {
    /// Classify a row. The name decides first (`fs@snap`, `fs#bookmark`);
    /// the `type` column only separates volumes from filesystems.
    pub fn classify(name: &str, type_text: Option<&str>) -> Self {
        if name.contains('@') {
            return DatasetKind::Snapshot;
        }
        if name.contains('#') {
            return DatasetKind::Bookmark;
        }
        match type_text.map(str::trim) {
            Some("volume") => DatasetKind::Volume,
            Some("bookmark") => DatasetKind::Bookmark,
            _ => DatasetKind::Filesystem,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Filesystem => "filesystem",
            DatasetKind::Volume => "volume",
            DatasetKind::Snapshot => "snapshot",
            DatasetKind::Bookmark => "bookmark",
        }
    }

    pub fn is_top_level(self) -> bool {
        matches!(self, DatasetKind::Filesystem | DatasetKind::Volume)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Size(Option<u64>),
    Timestamp(Option<i64>),
    Ratio(Option<f64>),
    Flag(Option<bool>),
    Text,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub raw: String,
    pub value: Value,
    pub display: String,
}

impl Cell {
    pub fn decode(kind: PropertyKind, raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let (value, display) = match kind {
            PropertyKind::Size => {
                let v = decode_size(&raw);
                let display = v.map(human_readable).unwrap_or_else(|| raw.clone());
                (Value::Size(v), display)
            }
            PropertyKind::Timestamp => {
                let v = raw.parse::<i64>().ok();
                let display = v.and_then(fmt_timestamp).unwrap_or_else(|| raw.clone());
                (Value::Timestamp(v), display)
            }
            PropertyKind::Ratio => {
                let v = decode_ratio(&raw);
                let display = match v {
                    Some(r) => format!("{:.2}x", r),
                    None => raw.clone(),
                };
                (Value::Ratio(v), display)
            }
            PropertyKind::Flag => (Value::Flag(decode_flag(&raw)), raw.clone()),
            PropertyKind::Path | PropertyKind::Text => (Value::Text, raw.clone()),
        };
        Self {
            raw,
            value,
            display,
        }
    }
}

/// One row of `zfs list` output, decoded against the displayed columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub kind: DatasetKind,
    pub cells: Vec<Cell>,
}

impl Record {
    /// Decode `fields` (one per displayed column) for a row of `kind`.
    pub fn decode(columns: &[Property], fields: &[&str], kind: DatasetKind) -> Self {
        let cells = columns
            .iter()
            .zip(fields)
            .map(|(p, f)| Cell::decode(p.kind(), f))
            .collect();
        Self { kind, cells }
    }

    pub fn name(&self) -> &str {
        self.cells.first().map(|c| c.raw.as_str()).unwrap_or("")
    }

    /// For snapshots, the owning dataset (`pool/fs` for `pool/fs@snap`).
    pub fn parent_name(&self) -> Option<&str> {
        if self.kind != DatasetKind::Snapshot {
            return None;
        }
        self.name().split_once('@').map(|(fs, _)| fs)
    }

    pub fn cell(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }
}

pub fn decode_ratio(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim_end_matches(['x', 'X']).parse().ok()?;
    v.is_finite().then_some(v)
}

fn decode_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Some(true),
        "off" | "no" | "false" => Some(false),
        _ => None,
    }
}

fn ts_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month repr:numerical padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]Z",
        )
        .expect("valid time format")
    })
}

/// Format epoch seconds (`zfs list -p` creation) for display.
pub fn fmt_timestamp(secs: i64) -> Option<String> {
    let dt = OffsetDateTime::from_unix_timestamp(secs).ok()?;
    dt.format(ts_format()).ok()
}
