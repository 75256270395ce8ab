//! Display-name tables for ids found in showcase payloads
//!
//! Unknown ids fall back to a synthetic name derived from the id, so the
//! same unknown character keeps the same identity key across scans.

/// Slot name for an equip type, e.g. `EQUIP_BRACER` → `Flower`
pub fn slot_name(equip_type: &str) -> Option<&'static str> {
    EQUIP_SLOTS
        .iter()
        .find(|(id, _)| *id == equip_type)
        .map(|(_, name)| *name)
}

/// Stat label for a property id; unknown ids lose their `FIGHT_PROP_` prefix
pub fn prop_name(prop_id: &str) -> String {
    PROPS
        .iter()
        .find(|(id, _)| *id == prop_id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| prop_id.trim_start_matches("FIGHT_PROP_").to_string())
}

/// Artifact set name, `Set_<id>` when unknown
pub fn set_name(set_id: u64) -> String {
    SETS.iter()
        .find(|(id, _)| *id == set_id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Set_{}", set_id))
}

/// Character name, `ID_<id>` when unknown
pub fn character_name(avatar_id: u64) -> String {
    CHARACTERS
        .iter()
        .find(|(id, _)| *id == avatar_id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("ID_{}", avatar_id))
}

/// Elemental damage bonus properties, in the order they are checked
pub const ELEMENT_BONUS_PROPS: [(&str, &str); 7] = [
    ("40", "Pyro"),
    ("41", "Electro"),
    ("42", "Hydro"),
    ("43", "Dendro"),
    ("44", "Anemo"),
    ("45", "Geo"),
    ("46", "Cryo"),
];

#[rustfmt::skip]
const EQUIP_SLOTS: &[(&str, &str)] = &[
    ("EQUIP_BRACER",   "Flower"),
    ("EQUIP_NECKLACE", "Plume"),
    ("EQUIP_SHOES",    "Sands"),
    ("EQUIP_RING",     "Goblet"),
    ("EQUIP_DRESS",    "Circlet"),
];

#[rustfmt::skip]
const PROPS: &[(&str, &str)] = &[
    ("FIGHT_PROP_HP",                "HP"),
    ("FIGHT_PROP_HP_PERCENT",        "HP%"),
    ("FIGHT_PROP_ATTACK",            "ATK"),
    ("FIGHT_PROP_ATTACK_PERCENT",    "ATK%"),
    ("FIGHT_PROP_DEFENSE",           "DEF"),
    ("FIGHT_PROP_DEFENSE_PERCENT",   "DEF%"),
    ("FIGHT_PROP_CRITICAL",          "Crit Rate"),
    ("FIGHT_PROP_CRITICAL_HURT",     "Crit DMG"),
    ("FIGHT_PROP_CHARGE_EFFICIENCY", "ER%"),
    ("FIGHT_PROP_ELEMENT_MASTERY",   "EM"),
    ("FIGHT_PROP_HEAL_ADD",          "Healing%"),
    ("FIGHT_PROP_FIRE_ADD_HURT",     "Pyro DMG%"),
    ("FIGHT_PROP_WATER_ADD_HURT",    "Hydro DMG%"),
    ("FIGHT_PROP_ELEC_ADD_HURT",     "Electro DMG%"),
    ("FIGHT_PROP_ICE_ADD_HURT",      "Cryo DMG%"),
    ("FIGHT_PROP_WIND_ADD_HURT",     "Anemo DMG%"),
    ("FIGHT_PROP_ROCK_ADD_HURT",     "Geo DMG%"),
    ("FIGHT_PROP_GRASS_ADD_HURT",    "Dendro DMG%"),
    ("FIGHT_PROP_PHYSICAL_ADD_HURT", "Physical DMG%"),
];

#[rustfmt::skip]
const SETS: &[(u64, &str)] = &[
    (15001, "Gladiator's Finale"),
    (15002, "Wanderer's Troupe"),
    (15006, "Noblesse Oblige"),
    (15007, "Bloodstained Chivalry"),
    (15008, "Maiden Beloved"),
    (15014, "Archaic Petra"),
    (15015, "Retracing Bolide"),
    (15016, "Tenacity of the Millelith"),
    (15017, "Pale Flame"),
    (15018, "Shimenawa's Reminiscence"),
    (15019, "Heart of Depth"),
    (15020, "Emblem of Severed Fate"),
    (15021, "Viridescent Venerer"),
    (15022, "Crimson Witch of Flames"),
    (15024, "Blizzard Strayer"),
    (15025, "Thundering Fury"),
    (15026, "Lavawalker"),
    (15027, "Desert Pavilion Chronicle"),
    (15028, "Flower of Paradise Lost"),
    (15029, "Nymph's Dream"),
    (15030, "Vourukasha's Glow"),
    (15031, "Marechaussee Hunter"),
    (15032, "Golden Troupe"),
    (15033, "Song of Days Past"),
    (15034, "Nighttime Whispers in the Echoing Woods"),
    (15035, "Fragment of Harmonic Whimsy"),
    (15036, "Unfinished Reverie"),
    (15037, "Scroll of the Hero of Cinder City"),
    (15038, "Obsidian Codex"),
    (15040, "Finale of the deep galeries"),
];

#[rustfmt::skip]
const CHARACTERS: &[(u64, &str)] = &[
    (10000002, "Kamisato Ayaka"),
    (10000003, "Jean"),
    (10000006, "Lisa"),
    (10000014, "Barbara"),
    (10000015, "Kaeya"),
    (10000016, "Diluc"),
    (10000020, "Razor"),
    (10000021, "Amber"),
    (10000022, "Venti"),
    (10000023, "Xiangling"),
    (10000024, "Beidou"),
    (10000025, "Xingqiu"),
    (10000026, "Xiao"),
    (10000027, "Ningguang"),
    (10000029, "Klee"),
    (10000030, "Zhongli"),
    (10000031, "Fischl"),
    (10000032, "Bennett"),
    (10000033, "Tartaglia"),
    (10000034, "Noelle"),
    (10000035, "Qiqi"),
    (10000036, "Chongyun"),
    (10000037, "Ganyu"),
    (10000038, "Albedo"),
    (10000039, "Diona"),
    (10000041, "Mona"),
    (10000042, "Keqing"),
    (10000043, "Sucrose"),
    (10000044, "Xinyan"),
    (10000045, "Rosaria"),
    (10000046, "Hu Tao"),
    (10000047, "Kaedehara Kazuha"),
    (10000048, "Yanfei"),
    (10000049, "Yoimiya"),
    (10000050, "Thoma"),
    (10000051, "Eula"),
    (10000052, "Raiden Shogun"),
    (10000053, "Sayu"),
    (10000054, "Sangonomiya Kokomi"),
    (10000055, "Gorou"),
    (10000056, "Kujou Sara"),
    (10000057, "Arataki Itto"),
    (10000058, "Yae Miko"),
    (10000059, "Shikanoin Heizou"),
    (10000060, "Yelan"),
    (10000061, "Kirara"),
    (10000062, "Aloy"),
    (10000063, "Shenhe"),
    (10000064, "Yun Jin"),
    (10000065, "Kuki Shinobu"),
    (10000066, "Kamisato Ayato"),
    (10000067, "Collei"),
    (10000068, "Dori"),
    (10000069, "Tighnari"),
    (10000070, "Nilou"),
    (10000071, "Cyno"),
    (10000072, "Candace"),
    (10000073, "Nahida"),
    (10000074, "Layla"),
    (10000075, "Wanderer"),
    (10000076, "Faruzan"),
    (10000077, "Yaoyao"),
    (10000078, "Alhaitham"),
    (10000079, "Dehya"),
    (10000080, "Mika"),
    (10000081, "Kaveh"),
    (10000082, "Baizhu"),
    (10000083, "Lynette"),
    (10000084, "Lyney"),
    (10000085, "Freminet"),
    (10000086, "Wriothesley"),
    (10000087, "Neuvillette"),
    (10000088, "Charlotte"),
    (10000089, "Furina"),
    (10000090, "Chevreuse"),
    (10000091, "Navia"),
    (10000092, "Gaming"),
    (10000093, "Xianyun"),
    (10000094, "Chiori"),
    (10000095, "Sigewinne"),
    (10000096, "Arlecchino"),
    (10000097, "Sethos"),
    (10000098, "Clorinde"),
    (10000099, "Emilie"),
    (10000100, "Kachina"),
    (10000101, "Kinich"),
    (10000102, "Mualani"),
    (10000103, "Xilonen"),
    (10000104, "Chasca"),
    (10000105, "Ororon"),
    (10000106, "Mavuika"),
    (10000107, "Citlali"),
    (10000108, "Lan Yan"),
    (10000109, "Yumemizuki Mizuki"),
    (10000110, "Iansan"),
    (10000111, "Varesa"),
    (10000112, "Escoffier"),
    (10000113, "Ifa"),
    (10000114, "Skirk"),
    (10000115, "Dahlia"),
    (10000116, "Ineffa"),
    (10000119, "Lauma"),
    (10000120, "Flins"),
    (10000121, "Aino"),
    (10000122, "Nefer"),
    (10000123, "Durin"),
    (10000124, "Jahoda"),
    (10000901, "Mavuika (Trial)"),
    (10000902, "Hu Tao (Trial)"),
    (10000903, "Ineffa (Trial)"),
    (10000904, "Columbina"),
    (11000046, "Pyro Archon (Test)"),
];
