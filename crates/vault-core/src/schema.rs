//! Series definitions and their fixed column orders
//!
//! Each series owns one ordered column list. The leading `identity` columns
//! name the entity a row describes; every column (identity included) takes
//! part in content equality. Key derivation, reconciliation and the snapshot
//! files all read columns in exactly this order.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Artifact slots in display order, with the column prefix used by the
/// combined series.
pub const SLOT_ORDER: [(&str, &str); 5] = [
    ("Flower", "FL"),
    ("Plume", "PL"),
    ("Sands", "SA"),
    ("Goblet", "GO"),
    ("Circlet", "CI"),
];

/// Maximum number of substats on one artifact
pub const MAX_SUBSTATS: usize = 4;

const CHARACTER_COLUMNS: &[&str] = &[
    "Owner",
    "Character",
    "Level",
    "HP",
    "ATK",
    "DEF",
    "EM",
    "ER%",
    "Crit_Rate%",
    "Crit_DMG%",
    "Element",
    "Elem_Bonus%",
    "Total_CV",
    "Weapon_Refine",
];

const ARTIFACT_COLUMNS: &[&str] = &[
    "Owner",
    "Character",
    "Slot",
    "Set",
    "Level",
    "Main_Stat",
    "Main_Value",
    "Sub1",
    "Sub1_Val",
    "Sub2",
    "Sub2_Val",
    "Sub3",
    "Sub3_Val",
    "Sub4",
    "Sub4_Val",
    "Crit_Value",
];

const COMBINED_COLUMNS: &[&str] = &[
    "Owner",
    "Character",
    "Level",
    "HP",
    "ATK",
    "DEF",
    "EM",
    "ER%",
    "Crit_Rate%",
    "Crit_DMG%",
    "Element",
    "Elem_Bonus%",
    "Total_CV",
    "FL_Set",
    "FL_Main",
    "FL_MainVal",
    "FL_CV",
    "FL_Subs",
    "PL_Set",
    "PL_Main",
    "PL_MainVal",
    "PL_CV",
    "PL_Subs",
    "SA_Set",
    "SA_Main",
    "SA_MainVal",
    "SA_CV",
    "SA_Subs",
    "GO_Set",
    "GO_Main",
    "GO_MainVal",
    "GO_CV",
    "GO_Subs",
    "CI_Set",
    "CI_Main",
    "CI_MainVal",
    "CI_CV",
    "CI_Subs",
];

/// Number of character stat columns the combined series copies verbatim
pub(crate) const COMBINED_STAT_COLUMNS: usize = 13;

static CHARACTERS: Schema = Schema {
    columns: CHARACTER_COLUMNS,
    identity: 2,
};

static ARTIFACTS: Schema = Schema {
    columns: ARTIFACT_COLUMNS,
    identity: 3,
};

static COMBINED: Schema = Schema {
    columns: COMBINED_COLUMNS,
    identity: 2,
};

/// Column layout of one series
#[derive(Debug)]
pub struct Schema {
    /// All columns, identity columns first
    pub columns: &'static [&'static str],
    /// How many leading columns form the identity
    pub identity: usize,
}

impl Schema {
    /// Columns naming which entity a row describes
    pub fn identity_fields(&self) -> &'static [&'static str] {
        &self.columns[..self.identity]
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Find a column index by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == name)
    }
}

/// A named, independently versioned record collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    Characters,
    Artifacts,
    Combined,
}

impl Series {
    /// All series, in the order a scan commits them
    pub const ALL: [Series; 3] = [Series::Characters, Series::Artifacts, Series::Combined];

    /// File-stem name of the series
    pub fn name(self) -> &'static str {
        match self {
            Series::Characters => "characters",
            Series::Artifacts => "artifacts",
            Series::Combined => "combined",
        }
    }

    /// Column layout of the series
    pub fn schema(self) -> &'static Schema {
        match self {
            Series::Characters => &CHARACTERS,
            Series::Artifacts => &ARTIFACTS,
            Series::Combined => &COMBINED,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Series {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Series::ALL
            .into_iter()
            .find(|series| series.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownSeries(s.to_string()))
    }
}
