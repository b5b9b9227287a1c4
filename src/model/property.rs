use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A property name as accepted by `zfs list -o`.
///
/// Known properties carry a decode kind; anything else (including user
/// properties such as `com.example:tag`) is kept verbatim as `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Name,
    Type,
    Used,
    UsedByChildren,
    UsedByDataset,
    UsedBySnapshots,
    UsedByRefreservation,
    Available,
    Referenced,
    LogicalUsed,
    LogicalReferenced,
    Quota,
    RefQuota,
    Reservation,
    RefReservation,
    VolSize,
    Written,
    Mountpoint,
    Origin,
    Creation,
    CompressRatio,
    RefCompressRatio,
    Mounted,
    ReadOnly,
    CanMount,
    Compression,
    Other(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Size,
    Timestamp,
    Ratio,
    Path,
    Flag,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    #[error("empty property name")]
    Empty,
    #[error("invalid property name `{0}`")]
    Invalid(String),
}

impl Property {
    pub fn as_str(&self) -> &str {
        match self {
            Property::Name => "name",
            Property::Type => "type",
            Property::Used => "used",
            Property::UsedByChildren => "usedbychildren",
            Property::UsedByDataset => "usedbydataset",
            Property::UsedBySnapshots => "usedbysnapshots",
            Property::UsedByRefreservation => "usedbyrefreservation",
            Property::Available => "available",
            Property::Referenced => "referenced",
            Property::LogicalUsed => "logicalused",
            Property::LogicalReferenced => "logicalreferenced",
            Property::Quota => "quota",
            Property::RefQuota => "refquota",
            Property::Reservation => "reservation",
            Property::RefReservation => "refreservation",
            Property::VolSize => "volsize",
            Property::Written => "written",
            Property::Mountpoint => "mountpoint",
            Property::Origin => "origin",
            Property::Creation => "creation",
            Property::CompressRatio => "compressratio",
            Property::RefCompressRatio => "refcompressratio",
            Property::Mounted => "mounted",
            Property::ReadOnly => "readonly",
            Property::CanMount => "canmount",
            Property::Compression => "compression",
            Property::Other(name) => name.as_str(),
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            Property::Used
            | Property::UsedByChildren
            | Property::UsedByDataset
            | Property::UsedBySnapshots
            | Property::UsedByRefreservation
            | Property::Available
            | Property::Referenced
            | Property::LogicalUsed
            | Property::LogicalReferenced
            | Property::Quota
            | Property::RefQuota
            | Property::Reservation
            | Property::RefReservation
            | Property::VolSize
            | Property::Written => PropertyKind::Size,
            Property::Creation => PropertyKind::Timestamp,
            Property::CompressRatio | Property::RefCompressRatio => PropertyKind::Ratio,
            Property::Name | Property::Mountpoint | Property::Origin => PropertyKind::Path,
            Property::Mounted | Property::ReadOnly | Property::CanMount => PropertyKind::Flag,
            Property::Type | Property::Compression | Property::Other(_) => PropertyKind::Text,
        }
    }

    pub fn alignment(&self) -> Alignment {
        match self.kind() {
            PropertyKind::Path | PropertyKind::Timestamp => Alignment::Left,
            _ => Alignment::Right,
        }
    }
}

impl FromStr for Property {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(PropertyError::Empty);
        }
        // User properties keep their case; native ones are matched case-insensitively.
        let valid = raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | '_' | '-'));
        if !valid {
            return Err(PropertyError::Invalid(raw.to_string()));
        }

        let p = match raw.to_ascii_lowercase().as_str() {
            "name" => Property::Name,
            "type" => Property::Type,
            "used" => Property::Used,
            "usedbychildren" | "usedchild" => Property::UsedByChildren,
            "usedbydataset" | "usedds" => Property::UsedByDataset,
            "usedbysnapshots" | "usedsnap" => Property::UsedBySnapshots,
            "usedbyrefreservation" | "usedrefreserv" => Property::UsedByRefreservation,
            "available" | "avail" => Property::Available,
            "referenced" | "refer" => Property::Referenced,
            "logicalused" | "lused" => Property::LogicalUsed,
            "logicalreferenced" | "lrefer" => Property::LogicalReferenced,
            "quota" => Property::Quota,
            "refquota" => Property::RefQuota,
            "reservation" | "reserv" => Property::Reservation,
            "refreservation" | "refreserv" => Property::RefReservation,
            "volsize" => Property::VolSize,
            "written" => Property::Written,
            "mountpoint" => Property::Mountpoint,
            "origin" => Property::Origin,
            "creation" => Property::Creation,
            "compressratio" | "ratio" => Property::CompressRatio,
            "refcompressratio" | "refratio" => Property::RefCompressRatio,
            "mounted" => Property::Mounted,
            "readonly" | "rdonly" => Property::ReadOnly,
            "canmount" => Property::CanMount,
            "compression" | "compress" => Property::Compression,
            _ => Property::Other(raw.to_string()),
        };
        Ok(p)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
