use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Shown when an exercise has no machine setting.
pub const SETTING_NOT_APPLICABLE: &str = "N/A";

/// A single exercise definition from the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Library key. Filled in from the map key when the catalog is loaded.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub equipment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<String>,
    pub detail: String,
    /// Static infographic reference.
    pub vis_static: String,
    /// Looping animation reference.
    pub vis_loop: String,
}

impl ExerciseRecord {
    /// The bench/machine setting, or `"N/A"` when none is given.
    pub fn setting_label(&self) -> &str {
        match self.setting.as_deref() {
            Some(setting) if !setting.trim().is_empty() => setting,
            _ => SETTING_NOT_APPLICABLE,
        }
    }
}

/// Exercise id -> record. Serialized as the library map, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, ExerciseRecord>")]
pub struct Catalog {
    records: BTreeMap<String, ExerciseRecord>,
}

impl Catalog {
    pub fn get(&self, id: &str) -> Option<&ExerciseRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.records.values()
    }
}

impl From<BTreeMap<String, ExerciseRecord>> for Catalog {
    fn from(mut records: BTreeMap<String, ExerciseRecord>) -> Self {
        for (id, record) in records.iter_mut() {
            record.id = id.clone();
        }
        Self { records }
    }
}

/// A record as it appears in the library map; the id is the key.
#[derive(Serialize)]
struct LibraryEntry<'a> {
    name: &'a str,
    equipment: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    setting: Option<&'a str>,
    detail: &'a str,
    vis_static: &'a str,
    vis_loop: &'a str,
}

impl<'a> From<&'a ExerciseRecord> for LibraryEntry<'a> {
    fn from(record: &'a ExerciseRecord) -> Self {
        Self {
            name: &record.name,
            equipment: &record.equipment,
            setting: record.setting.as_deref(),
            detail: &record.detail,
            vis_static: &record.vis_static,
            vis_loop: &record.vis_loop,
        }
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.records
                .iter()
                .map(|(id, record)| (id, LibraryEntry::from(record))),
        )
    }
}

impl FromIterator<ExerciseRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = ExerciseRecord>>(iter: I) -> Self {
        let records = iter
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self { records }
    }
}
