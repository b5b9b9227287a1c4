mod columns;
mod property;
mod record;
mod size;

pub use self::columns::{ColumnSpec, DEFAULT_COLUMNS};
pub use self::property::{Alignment, Property, PropertyError, PropertyKind};
pub use self::record::{Cell, DatasetKind, Record, Value, decode_ratio, fmt_timestamp};
pub use self::size::{decode_size, human_readable};
