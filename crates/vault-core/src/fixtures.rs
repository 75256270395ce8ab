//! Showcase payloads shared by unit tests

use serde_json::{json, Value};

pub(crate) const OWNER: &str = "700000001";

fn artifact(equip_type: &str, set_id: u64, main: (&str, f64), subs: &[(&str, f64)]) -> Value {
    let subs: Vec<Value> = subs
        .iter()
        .map(|(id, v)| json!({ "appendPropId": id, "statValue": v }))
        .collect();
    json!({
        "itemId": 90000,
        "reliquary": { "level": 21, "mainPropId": 10001 },
        "flat": {
            "itemType": "ITEM_RELIQUARY",
            "equipType": equip_type,
            "setId": set_id,
            "reliquaryMainstat": { "mainPropId": main.0, "statValue": main.1 },
            "reliquarySubstats": subs
        }
    })
}

fn weapon(refine_index: u32) -> Value {
    json!({
        "itemId": 11501,
        "weapon": { "level": 90, "affixMap": { "111501": refine_index } },
        "flat": {
            "itemType": "ITEM_WEAPON",
            "weaponStats": [
                { "appendPropId": "FIGHT_PROP_BASE_ATTACK", "statValue": 608 },
                { "appendPropId": "FIGHT_PROP_CRITICAL", "statValue": 33.1 }
            ]
        }
    })
}

/// Showcase with Amber (HP as given) and optionally Bennett
pub(crate) fn showcase(amber_hp: f64, include_bennett: bool) -> Value {
    let amber = json!({
        "avatarId": 10000021,
        "propMap": { "4001": { "type": 4001, "ival": "0", "val": "90" } },
        "fightPropMap": {
            "2000": amber_hp, "2001": 1800.4, "2002": 700.0, "28": 40.0,
            "23": 1.205, "20": 0.622, "22": 1.401, "40": 0.466
        },
        "equipList": [
            weapon(4),
            artifact(
                "EQUIP_BRACER",
                15022,
                ("FIGHT_PROP_HP", 4780.0),
                &[
                    ("FIGHT_PROP_CRITICAL", 3.9),
                    ("FIGHT_PROP_CRITICAL_HURT", 7.8),
                    ("FIGHT_PROP_ATTACK_PERCENT", 5.8),
                    ("FIGHT_PROP_ELEMENT_MASTERY", 23.0),
                ],
            ),
            artifact(
                "EQUIP_NECKLACE",
                15022,
                ("FIGHT_PROP_ATTACK", 311.0),
                &[
                    ("FIGHT_PROP_CRITICAL", 7.0),
                    ("FIGHT_PROP_CRITICAL_HURT", 14.0),
                    ("FIGHT_PROP_HP", 299.0),
                ],
            ),
        ]
    });

    let bennett = json!({
        "avatarId": 10000032,
        "propMap": { "4001": { "type": 4001, "val": "80" } },
        "fightPropMap": {
            "2000": 30000.0, "2001": 900.0, "2002": 800.0, "28": 0.0,
            "23": 2.1, "20": 0.05, "22": 0.5, "40": 0.15
        },
        "equipList": [
            weapon(0),
            artifact(
                "EQUIP_BRACER",
                15006,
                ("FIGHT_PROP_HP", 4780.0),
                &[("FIGHT_PROP_HP_PERCENT", 9.3), ("FIGHT_PROP_CHARGE_EFFICIENCY", 11.0)],
            ),
            artifact(
                "EQUIP_SHOES",
                15006,
                ("FIGHT_PROP_HP_PERCENT", 46.6),
                &[("FIGHT_PROP_CRITICAL", 2.7)],
            ),
        ]
    });

    let mut avatars = vec![amber];
    if include_bennett {
        avatars.push(bennett);
    }

    json!({
        "playerInfo": { "nickname": "Traveler", "level": 60, "worldLevel": 8 },
        "avatarInfoList": avatars,
        "ttl": 60,
        "uid": OWNER
    })
}
