use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Unit catalog: column name → physical unit
// ---------------------------------------------------------------------------

/// Immutable mapping from known column names to unit labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitCatalog {
    units: BTreeMap<String, String>,
}

impl UnitCatalog {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        UnitCatalog {
            units: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Units of the CERN dielectron dataset.
    pub fn dielectron() -> Self {
        let energies = ["E1", "E2", "pt1", "pt2", "M"].map(|c| (c, "GeV"));
        let momenta = ["px1", "py1", "pz1", "px2", "py2", "pz2"].map(|c| (c, "GeV/c"));
        let angles = ["phi1", "phi2"].map(|c| (c, "rad"));
        UnitCatalog::new(energies.into_iter().chain(momenta).chain(angles))
    }

    /// Unit of `column`, or `""` when the column is not catalogued.
    pub fn unit_for(&self, column: &str) -> &str {
        self.units.get(column).map_or("", String::as_str)
    }

    /// Axis label `"<column> (<unit>)"`.
    pub fn axis_label(&self, column: &str) -> String {
        format!("{column} ({})", self.unit_for(column))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
