//! Records, record sets and the typed per-series record shapes

use crate::error::{Error, Result};
use crate::schema::{Series, MAX_SUBSTATS};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One row of a series, values aligned with the series columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    /// Create a record from values in schema order
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Values in schema order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column name
    pub fn field(&self, series: Series, name: &str) -> Option<&Value> {
        series.schema().index_of(name).and_then(|i| self.get(i))
    }

    /// Check the record fits the series: right arity, identity fields present.
    pub fn validate(&self, series: Series) -> Result<()> {
        let schema = series.schema();
        if self.values.len() != schema.width() {
            return Err(Error::MalformedRecord {
                series,
                reason: format!(
                    "expected {} fields, found {}",
                    schema.width(),
                    self.values.len()
                ),
            });
        }
        for (name, value) in schema.identity_fields().iter().zip(&self.values) {
            if value.is_empty() {
                return Err(Error::MalformedRecord {
                    series,
                    reason: format!("missing identity field '{}'", name),
                });
            }
        }
        Ok(())
    }
}

/// A fully materialized collection of records for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Series the records belong to
    pub series: Series,
    /// Column names, in schema order
    pub columns: Vec<String>,
    /// Record rows
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Create an empty record set for a series
    pub fn new(series: Series) -> Self {
        Self::from_records(series, Vec::new())
    }

    /// Wrap records that are already in the series' column order
    pub fn from_records(series: Series, records: Vec<Record>) -> Self {
        Self {
            series,
            columns: series
                .schema()
                .columns
                .iter()
                .map(|c| c.to_string())
                .collect(),
            records,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

/// Stats row for one showcased character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub owner: String,
    pub character: String,
    pub level: u32,
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
    pub elemental_mastery: i64,
    /// Energy recharge, percent
    pub energy_recharge: f64,
    /// Crit rate, percent
    pub crit_rate: f64,
    /// Crit damage, percent
    pub crit_damage: f64,
    pub element: Option<String>,
    /// Elemental damage bonus, percent
    pub element_bonus: f64,
    /// Sum of the crit value of all equipped artifacts
    pub total_crit_value: f64,
    pub weapon_refinement: u32,
}

impl CharacterRecord {
    /// Flatten into a record in `characters` column order
    pub fn to_record(&self) -> Record {
        Record::new(vec![
            Value::text(self.owner.as_str()),
            Value::text(self.character.as_str()),
            self.level.into(),
            self.hp.into(),
            self.atk.into(),
            self.def.into(),
            self.elemental_mastery.into(),
            self.energy_recharge.into(),
            self.crit_rate.into(),
            self.crit_damage.into(),
            Value::text(self.element.as_deref().unwrap_or("N/A")),
            self.element_bonus.into(),
            self.total_crit_value.into(),
            self.weapon_refinement.into(),
        ])
    }
}

/// A substat roll on an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substat {
    pub name: String,
    pub value: f64,
}

/// One equipped artifact piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub owner: String,
    pub character: String,
    pub slot: String,
    pub set_name: String,
    pub enhancement_level: u32,
    pub main_stat: String,
    pub main_value: f64,
    /// Up to four substats, in roll order
    pub substats: Vec<Substat>,
    pub crit_value: f64,
}

impl ArtifactRecord {
    /// Flatten into a record in `artifacts` column order
    pub fn to_record(&self) -> Record {
        let mut values = vec![
            Value::text(self.owner.as_str()),
            Value::text(self.character.as_str()),
            Value::text(self.slot.as_str()),
            Value::text(self.set_name.as_str()),
            self.enhancement_level.into(),
            Value::text(self.main_stat.as_str()),
            self.main_value.into(),
        ];
        for i in 0..MAX_SUBSTATS {
            match self.substats.get(i) {
                Some(sub) => {
                    values.push(Value::text(sub.name.as_str()));
                    values.push(sub.value.into());
                }
                None => {
                    values.push(Value::Empty);
                    values.push(Value::Empty);
                }
            }
        }
        values.push(self.crit_value.into());
        Record::new(values)
    }
}
