//! Hierarchical region selection.
//!
//! A [`RegionCatalog`] holds the static region groups. Each group has one
//! aggregate entry ("LATAM (Full Region)") and its countries. A [`Selection`]
//! is only ever produced by catalog operations, so it always satisfies:
//! the aggregate of a group is selected exactly when every country of that
//! group is selected.

use crate::domain::model::{Region, RegionGroup};
use crate::utils::error::{DirectoryError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Handle to one entry of a [`RegionCatalog`], obtained through
/// [`RegionCatalog::lookup`]. Only meaningful for the catalog that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionKey {
    group: usize,
    // 0 is the aggregate, n is countries[n - 1]
    slot: usize,
}

impl RegionKey {
    fn aggregate_of(group: usize) -> Self {
        Self { group, slot: 0 }
    }

    pub fn is_aggregate(&self) -> bool {
        self.slot == 0
    }

    pub fn group_index(&self) -> usize {
        self.group
    }
}

/// Set of selected regions, iterated in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: BTreeSet<RegionKey>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: RegionKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.keys.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn identifiers<'c>(&self, catalog: &'c RegionCatalog) -> Vec<&'c str> {
        self.keys()
            .filter_map(|key| catalog.region(key))
            .map(|region| region.value.as_str())
            .collect()
    }

    pub fn labels<'c>(&self, catalog: &'c RegionCatalog) -> Vec<&'c str> {
        self.keys()
            .filter_map(|key| catalog.region(key))
            .map(|region| region.label.as_str())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct RegionCatalog {
    groups: Vec<RegionGroup>,
    index: HashMap<String, RegionKey>,
}

impl RegionCatalog {
    /// Validates the reference data and builds the identifier index.
    pub fn new(groups: Vec<RegionGroup>) -> Result<Self> {
        let mut index = HashMap::new();
        let mut names = HashSet::new();

        for (group_idx, group) in groups.iter().enumerate() {
            if group.name.trim().is_empty() {
                return Err(DirectoryError::InvalidCatalog {
                    message: format!("group #{} has an empty name", group_idx + 1),
                });
            }
            if !names.insert(group.name.as_str()) {
                return Err(DirectoryError::InvalidCatalog {
                    message: format!("group '{}' is defined twice", group.name),
                });
            }
            if group.countries.is_empty() {
                return Err(DirectoryError::InvalidCatalog {
                    message: format!("group '{}' has no countries", group.name),
                });
            }

            let entries = std::iter::once(&group.aggregate).chain(group.countries.iter());
            for (slot, region) in entries.enumerate() {
                if region.value.trim().is_empty() {
                    return Err(DirectoryError::InvalidCatalog {
                        message: format!("group '{}' has an entry without identifier", group.name),
                    });
                }
                let key = RegionKey {
                    group: group_idx,
                    slot,
                };
                if index.insert(region.value.clone(), key).is_some() {
                    return Err(DirectoryError::InvalidCatalog {
                        message: format!("identifier '{}' is used more than once", region.value),
                    });
                }
            }
        }

        tracing::debug!(
            "Region catalog loaded: {} groups, {} identifiers",
            groups.len(),
            index.len()
        );
        Ok(Self { groups, index })
    }

    /// LATAM and Europe, as offered by the lead-capture forms.
    pub fn builtin() -> Self {
        Self::new(builtin_groups()).expect("built-in region groups are well formed")
    }

    pub fn groups(&self) -> &[RegionGroup] {
        &self.groups
    }

    pub fn lookup(&self, identifier: &str) -> Option<RegionKey> {
        self.index.get(identifier).copied()
    }

    pub fn region(&self, key: RegionKey) -> Option<&Region> {
        let group = self.groups.get(key.group)?;
        match key.slot {
            0 => Some(&group.aggregate),
            slot => group.countries.get(slot - 1),
        }
    }

    /// Every key in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.groups
            .iter()
            .enumerate()
            .flat_map(|(group, g)| (0..=g.countries.len()).map(move |slot| RegionKey { group, slot }))
    }

    fn country_keys(&self, group: usize) -> impl Iterator<Item = RegionKey> {
        let count = self.groups.get(group).map_or(0, |g| g.countries.len());
        (1..=count).map(move |slot| RegionKey { group, slot })
    }

    /// Flips `key`. Selecting or clearing an aggregate expands or collapses
    /// the whole group; a country change recomputes its group's aggregate.
    pub fn toggle(&self, selection: &Selection, key: RegionKey) -> Selection {
        if self.region(key).is_none() {
            return selection.clone();
        }

        let mut keys = selection.keys.clone();
        let aggregate = RegionKey::aggregate_of(key.group);

        if key.is_aggregate() {
            if keys.remove(&aggregate) {
                for country in self.country_keys(key.group) {
                    keys.remove(&country);
                }
            } else {
                keys.insert(aggregate);
                keys.extend(self.country_keys(key.group));
            }
        } else if keys.remove(&key) {
            keys.remove(&aggregate);
        } else {
            keys.insert(key);
            if self.country_keys(key.group).all(|c| keys.contains(&c)) {
                keys.insert(aggregate);
            }
        }

        Selection { keys }
    }

    /// Deselects `key` if it is selected; otherwise returns the selection unchanged.
    pub fn remove(&self, selection: &Selection, key: RegionKey) -> Selection {
        if selection.contains(key) {
            self.toggle(selection, key)
        } else {
            selection.clone()
        }
    }

    /// String boundary for free-text callers.
    pub fn toggle_identifier(&self, selection: &Selection, identifier: &str) -> Result<Selection> {
        let key = self
            .lookup(identifier)
            .ok_or_else(|| DirectoryError::UnknownRegion {
                identifier: identifier.to_string(),
            })?;
        Ok(self.toggle(selection, key))
    }

    /// Toggles each identifier in turn, starting from an empty selection.
    pub fn selection_from_identifiers<I, S>(&self, identifiers: I) -> Result<Selection>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        identifiers
            .into_iter()
            .try_fold(Selection::new(), |selection, id| {
                self.toggle_identifier(&selection, id.as_ref())
            })
    }

    pub fn is_fully_selected(&self, selection: &Selection, group: usize) -> bool {
        selection.contains(RegionKey::aggregate_of(group))
    }

    /// Aggregate membership agrees with country coverage in every group.
    pub fn is_consistent(&self, selection: &Selection) -> bool {
        (0..self.groups.len()).all(|group| {
            let covered = self.country_keys(group).all(|c| selection.contains(c));
            covered == selection.contains(RegionKey::aggregate_of(group))
        })
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_groups() -> Vec<RegionGroup> {
    fn regions(entries: &[(&str, &str)]) -> Vec<Region> {
        entries
            .iter()
            .map(|(value, label)| Region::new(*value, *label))
            .collect()
    }

    vec![
        RegionGroup {
            name: "LATAM".to_string(),
            aggregate: Region::new("latam", "LATAM (Full Region)"),
            countries: regions(&[
                ("mexico", "Mexico"),
                ("brazil", "Brazil"),
                ("argentina", "Argentina"),
                ("chile", "Chile"),
                ("colombia", "Colombia"),
                ("peru", "Peru"),
                ("ecuador", "Ecuador"),
                ("uruguay", "Uruguay"),
                ("paraguay", "Paraguay"),
                ("bolivia", "Bolivia"),
                ("venezuela", "Venezuela"),
                ("panama", "Panama"),
                ("costa-rica", "Costa Rica"),
                ("guatemala", "Guatemala"),
                ("honduras", "Honduras"),
                ("el-salvador", "El Salvador"),
                ("nicaragua", "Nicaragua"),
                ("dominican-republic", "Dominican Republic"),
                ("puerto-rico", "Puerto Rico"),
            ]),
        },
        RegionGroup {
            name: "Europe".to_string(),
            aggregate: Region::new("europe", "Europe (Full Region)"),
            countries: regions(&[
                ("spain", "Spain"),
                ("uk", "United Kingdom"),
                ("germany", "Germany"),
                ("france", "France"),
                ("italy", "Italy"),
                ("portugal", "Portugal"),
            ]),
        },
    ]
}
