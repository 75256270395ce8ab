//! Combined series: one row per character, stats joined with its artifacts

use crate::record::{Record, RecordSet};
use crate::schema::{Series, COMBINED_STAT_COLUMNS, MAX_SUBSTATS, SLOT_ORDER};
use crate::value::Value;
use std::collections::HashMap;

/// Build combined rows from merged character and artifact sets.
///
/// Rows follow the character order. For each slot in `SLOT_ORDER` the row
/// carries set, main stat, main value, crit value and a `Name:Value` list
/// of substats joined with ` | `; a slot with no artifact stays empty.
pub fn combine(characters: &RecordSet, artifacts: &RecordSet) -> Vec<Record> {
    let art = Series::Artifacts.schema();
    let col = |name: &str| art.index_of(name).unwrap_or(usize::MAX);
    let (slot_col, set_col, main_col, main_val_col, cv_col) = (
        col("Slot"),
        col("Set"),
        col("Main_Stat"),
        col("Main_Value"),
        col("Crit_Value"),
    );
    let sub_cols: Vec<(usize, usize)> = (1..=MAX_SUBSTATS)
        .map(|i| (col(&format!("Sub{i}")), col(&format!("Sub{i}_Val"))))
        .collect();

    let mut by_character: HashMap<(String, String), HashMap<String, &Record>> = HashMap::new();
    for record in artifacts.iter() {
        let slot = record.get(slot_col).map(Value::normalize).unwrap_or_default();
        by_character
            .entry(owner_character(record))
            .or_default()
            .insert(slot, record);
    }

    let empty = HashMap::new();
    characters
        .iter()
        .map(|character| {
            let mut values: Vec<Value> = character
                .values()
                .iter()
                .take(COMBINED_STAT_COLUMNS)
                .cloned()
                .collect();
            values.resize(COMBINED_STAT_COLUMNS, Value::Empty);

            let slots = by_character
                .get(&owner_character(character))
                .unwrap_or(&empty);
            for (slot, _prefix) in SLOT_ORDER {
                match slots.get(slot) {
                    Some(artifact) => {
                        let field = |i: usize| artifact.get(i).cloned().unwrap_or(Value::Empty);
                        values.push(field(set_col));
                        values.push(field(main_col));
                        values.push(field(main_val_col));
                        values.push(field(cv_col));
                        values.push(Value::text(substat_summary(artifact, &sub_cols)));
                    }
                    None => values.extend(std::iter::repeat(Value::Empty).take(5)),
                }
            }
            Record::new(values)
        })
        .collect()
}

fn owner_character(record: &Record) -> (String, String) {
    let part = |i| record.get(i).map(Value::normalize).unwrap_or_default();
    (part(0), part(1))
}

fn substat_summary(artifact: &Record, sub_cols: &[(usize, usize)]) -> String {
    sub_cols
        .iter()
        .filter_map(|(name_col, val_col)| {
            let name = artifact.get(*name_col)?;
            if name.is_empty() {
                return None;
            }
            let value = artifact.get(*val_col).cloned().unwrap_or(Value::Empty);
            Some(format!("{}:{}", name, value))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::owner::OwnerId;
    use crate::payload::Showcase;

    fn sets() -> (RecordSet, RecordSet) {
        let owner = OwnerId::parse(fixtures::OWNER).unwrap();
        let showcase = Showcase::from_payload(&owner, &fixtures::showcase(1000.0, true)).unwrap();
        (
            RecordSet::from_records(Series::Characters, showcase.character_records()),
            RecordSet::from_records(Series::Artifacts, showcase.artifact_records()),
        )
    }

    #[test]
    fn test_one_row_per_character() {
        let (characters, artifacts) = sets();
        let rows = combine(&characters, &artifacts);

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert!(row.validate(Series::Combined).is_ok());
        }
        assert_eq!(
            rows[0].field(Series::Combined, "HP"),
            characters.records[0].field(Series::Characters, "HP")
        );
    }

    #[test]
    fn test_slot_projection() {
        let (characters, artifacts) = sets();
        let rows = combine(&characters, &artifacts);
        let amber = &rows[0];

        assert_eq!(
            amber.field(Series::Combined, "FL_Set"),
            Some(&Value::from("Crimson Witch of Flames"))
        );
        assert_eq!(
            amber.field(Series::Combined, "FL_Subs"),
            Some(&Value::from("Crit Rate:3.9 | Crit DMG:7.8 | ATK%:5.8 | EM:23"))
        );
        assert_eq!(amber.field(Series::Combined, "FL_CV"), Some(&Value::Float(15.6)));
        // Amber has no sands
        assert_eq!(amber.field(Series::Combined, "SA_Set"), Some(&Value::Empty));
        assert_eq!(amber.field(Series::Combined, "SA_Subs"), Some(&Value::Empty));

        let bennett = &rows[1];
        assert_eq!(
            bennett.field(Series::Combined, "SA_Main"),
            Some(&Value::from("HP%"))
        );
        assert_eq!(bennett.field(Series::Combined, "PL_Set"), Some(&Value::Empty));
    }

    #[test]
    fn test_character_without_artifacts() {
        let (characters, _) = sets();
        let rows = combine(&characters, &RecordSet::new(Series::Artifacts));

        assert_eq!(rows.len(), 2);
        let width = Series::Combined.schema().width();
        assert!(rows[0].values()[COMBINED_STAT_COLUMNS..width]
            .iter()
            .all(Value::is_empty));
    }
}
