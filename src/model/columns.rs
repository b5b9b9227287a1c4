use super::property::{Property, PropertyError};

pub const DEFAULT_COLUMNS: &str = "name,used,avail,refer,mountpoint";

/// Ordered list of displayed properties. `name` is always first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    columns: Vec<Property>,
}

impl ColumnSpec {
    pub fn new(props: Vec<Property>) -> Self {
        let mut columns = vec![Property::Name];
        for p in props {
            if !columns.contains(&p) {
                columns.push(p);
            }
        }
        Self { columns }
    }

    /// Parse a comma separated `-o` list, normalising aliases.
    pub fn parse(list: &str) -> Result<Self, PropertyError> {
        let props = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Property>, _>>()?;
        Ok(Self::new(props))
    }

    pub fn columns(&self) -> &[Property] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Property> {
        self.columns.get(idx)
    }

    /// Properties passed to `zfs list -o`: the displayed columns plus a
    /// trailing `type` unless it is already displayed.
    pub fn fetch_properties(&self) -> Vec<Property> {
        let mut out = self.columns.clone();
        if !out.contains(&Property::Type) {
            out.push(Property::Type);
        }
        out
    }

    pub fn type_index(&self) -> usize {
        self.columns
            .iter()
            .position(|p| *p == Property::Type)
            .unwrap_or(self.columns.len())
    }

    pub fn fetch_arg(&self) -> String {
        self.fetch_properties()
            .iter()
            .map(Property::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self::new(vec![
            Property::Used,
            Property::Available,
            Property::Referenced,
            Property::Mountpoint,
        ])
    }
}
