//! Showcase payload extraction
//!
//! Turns the snapshot API's JSON into typed character and artifact
//! records. Avatars and artifacts that cannot be read are skipped and
//! counted; they never fail the whole payload.

use crate::catalog::{self, ELEMENT_BONUS_PROPS};
use crate::error::Result;
use crate::owner::OwnerId;
use crate::record::{ArtifactRecord, CharacterRecord, Record, Substat};
use crate::schema::MAX_SUBSTATS;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

const PROP_LEVEL: &str = "4001";
const FIGHT_PROP_HP: &str = "2000";
const FIGHT_PROP_ATK: &str = "2001";
const FIGHT_PROP_DEF: &str = "2002";
const FIGHT_PROP_EM: &str = "28";
const FIGHT_PROP_ER: &str = "23";
const FIGHT_PROP_CRIT_RATE: &str = "20";
const FIGHT_PROP_CRIT_DMG: &str = "22";

const SUBSTAT_CRIT_RATE: &str = "FIGHT_PROP_CRITICAL";
const SUBSTAT_CRIT_DMG: &str = "FIGHT_PROP_CRITICAL_HURT";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShowcase {
    #[serde(default)]
    player_info: PlayerInfo,
    #[serde(default)]
    avatar_info_list: Vec<serde_json::Value>,
}

/// Player summary carried by the payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub nickname: Option<String>,
    pub level: Option<u32>,
    pub world_level: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAvatar {
    avatar_id: u64,
    #[serde(default)]
    prop_map: HashMap<String, serde_json::Value>,
    #[serde(default)]
    fight_prop_map: HashMap<String, f64>,
    #[serde(default)]
    equip_list: Vec<RawEquip>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEquip {
    #[serde(default)]
    flat: RawFlat,
    reliquary: Option<RawReliquary>,
    weapon: Option<RawWeapon>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlat {
    equip_type: Option<String>,
    set_id: Option<u64>,
    reliquary_mainstat: Option<RawMainStat>,
    #[serde(default)]
    reliquary_substats: Vec<RawSubStat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMainStat {
    main_prop_id: String,
    stat_value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubStat {
    append_prop_id: String,
    stat_value: f64,
}

#[derive(Debug, Deserialize)]
struct RawReliquary {
    level: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeapon {
    #[serde(default)]
    affix_map: BTreeMap<String, u32>,
}

/// Records extracted from one payload
#[derive(Debug, Clone, Default)]
pub struct Showcase {
    pub player: PlayerInfo,
    pub characters: Vec<CharacterRecord>,
    pub artifacts: Vec<ArtifactRecord>,
    /// Avatars and artifacts that could not be read
    pub skipped: usize,
}

impl Showcase {
    /// Extract records for `owner` from a raw payload.
    ///
    /// Fails only when the payload as a whole is not a showcase object.
    pub fn from_payload(owner: &OwnerId, payload: &serde_json::Value) -> Result<Self> {
        let raw = RawShowcase::deserialize(payload)?;
        let mut showcase = Showcase {
            player: raw.player_info,
            ..Showcase::default()
        };

        for (idx, value) in raw.avatar_info_list.iter().enumerate() {
            let avatar = match RawAvatar::deserialize(value) {
                Ok(avatar) => avatar,
                Err(e) => {
                    warn!(%owner, index = idx, error = %e, "skipping unreadable avatar");
                    showcase.skipped += 1;
                    continue;
                }
            };
            showcase.add_avatar(owner, &avatar);
        }

        Ok(showcase)
    }

    /// Rows for the `characters` series
    pub fn character_records(&self) -> Vec<Record> {
        self.characters.iter().map(CharacterRecord::to_record).collect()
    }

    /// Rows for the `artifacts` series
    pub fn artifact_records(&self) -> Vec<Record> {
        self.artifacts.iter().map(ArtifactRecord::to_record).collect()
    }

    fn add_avatar(&mut self, owner: &OwnerId, avatar: &RawAvatar) {
        let name = catalog::character_name(avatar.avatar_id);
        let fight = |key: &str, default: f64| avatar.fight_prop_map.get(key).copied().unwrap_or(default);

        let mut total_crit_value = 0.0;
        for equip in &avatar.equip_list {
            let Some(reliquary) = &equip.reliquary else {
                continue;
            };
            match extract_artifact(owner, &name, &equip.flat, reliquary) {
                Some(artifact) => {
                    total_crit_value += artifact.crit_value;
                    self.artifacts.push(artifact);
                }
                None => {
                    warn!(%owner, character = %name, "skipping artifact without slot or main stat");
                    self.skipped += 1;
                }
            }
        }

        let (element, element_bonus) = element_bonus(&avatar.fight_prop_map);
        let weapon_refinement = avatar
            .equip_list
            .iter()
            .find_map(|equip| equip.weapon.as_ref())
            .map(|weapon| weapon.affix_map.values().next().map_or(1, |rank| rank + 1))
            .unwrap_or(0);

        self.characters.push(CharacterRecord {
            owner: owner.to_string(),
            character: name,
            level: avatar.prop_map.get(PROP_LEVEL).map_or(0, prop_level),
            hp: fight(FIGHT_PROP_HP, 0.0).round() as i64,
            atk: fight(FIGHT_PROP_ATK, 0.0).round() as i64,
            def: fight(FIGHT_PROP_DEF, 0.0).round() as i64,
            elemental_mastery: fight(FIGHT_PROP_EM, 0.0).round() as i64,
            energy_recharge: percent(fight(FIGHT_PROP_ER, 1.0)),
            crit_rate: percent(fight(FIGHT_PROP_CRIT_RATE, 0.0)),
            crit_damage: percent(fight(FIGHT_PROP_CRIT_DMG, 0.0)),
            element,
            element_bonus,
            total_crit_value: round1(total_crit_value),
            weapon_refinement,
        });
    }
}

fn extract_artifact(
    owner: &OwnerId,
    character: &str,
    flat: &RawFlat,
    reliquary: &RawReliquary,
) -> Option<ArtifactRecord> {
    let equip_type = flat.equip_type.as_deref()?;
    let main = flat.reliquary_mainstat.as_ref()?;
    let slot = catalog::slot_name(equip_type).unwrap_or(equip_type);

    let mut crit_rate = 0.0;
    let mut crit_dmg = 0.0;
    for sub in &flat.reliquary_substats {
        match sub.append_prop_id.as_str() {
            SUBSTAT_CRIT_RATE => crit_rate = sub.stat_value,
            SUBSTAT_CRIT_DMG => crit_dmg = sub.stat_value,
            _ => {}
        }
    }

    Some(ArtifactRecord {
        owner: owner.to_string(),
        character: character.to_string(),
        slot: slot.to_string(),
        set_name: catalog::set_name(flat.set_id.unwrap_or(0)),
        enhancement_level: reliquary.level.unwrap_or(1).saturating_sub(1),
        main_stat: catalog::prop_name(&main.main_prop_id),
        main_value: main.stat_value,
        substats: flat
            .reliquary_substats
            .iter()
            .take(MAX_SUBSTATS)
            .map(|sub| Substat {
                name: catalog::prop_name(&sub.append_prop_id),
                value: sub.stat_value,
            })
            .collect(),
        crit_value: round1(crit_rate * 2.0 + crit_dmg),
    })
}

/// First non-zero elemental damage bonus, as (element, percent)
fn element_bonus(fight_props: &HashMap<String, f64>) -> (Option<String>, f64) {
    ELEMENT_BONUS_PROPS
        .iter()
        .find_map(|(key, element)| {
            fight_props
                .get(*key)
                .filter(|value| **value > 0.0)
                .map(|value| (Some(element.to_string()), percent(*value)))
        })
        .unwrap_or((None, 0.0))
}

/// Level from a prop entry; the API sends `val` as a string
fn prop_level(entry: &serde_json::Value) -> u32 {
    match entry.get("val") {
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        _ => 0,
    }
}

fn percent(ratio: f64) -> f64 {
    round1(ratio * 100.0)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
