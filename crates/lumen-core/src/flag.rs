//! Closed enumeration of photon step outcomes.
//!
//! Each flag is a single bit; the enum discriminant is its bit position.
//! All name, abbreviation and category lookups go through [`FLAG_TABLE`].

use serde::{Deserialize, Serialize};

use crate::constants::{BAD_FLAG_ABBREV, BAD_FLAG_NAME, ZERO_ABBREV, ZERO_NAME};

/// Outcome of one simulated photon step. Discriminant = bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Flag {
    Cerenkov = 0,
    Scintillation = 1,
    Miss = 2,
    BulkAbsorb = 3,
    BulkReemit = 4,
    BulkScatter = 5,
    SurfaceDetect = 6,
    SurfaceAbsorb = 7,
    SurfaceDreflect = 8,
    SurfaceSreflect = 9,
    BoundaryReflect = 10,
    BoundaryTransmit = 11,
    Torch = 12,
    NanAbort = 13,
    EfficiencyCollect = 14,
    EfficiencyCull = 15,
    Natural = 16,
    DeferFstrackinfo = 17,
}

/// One row of the flag table.
#[derive(Debug, Clone, Copy)]
pub struct FlagInfo {
    pub flag: Flag,
    pub name: &'static str,
    pub abbrev: &'static str,
}

const fn info(flag: Flag, name: &'static str, abbrev: &'static str) -> FlagInfo {
    FlagInfo { flag, name, abbrev }
}

/// Flag table indexed by bit position.
pub const FLAG_TABLE: [FlagInfo; 18] = [
    info(Flag::Cerenkov, "CERENKOV", "CK"),
    info(Flag::Scintillation, "SCINTILLATION", "SI"),
    info(Flag::Miss, "MISS", "MI"),
    info(Flag::BulkAbsorb, "BULK_ABSORB", "AB"),
    info(Flag::BulkReemit, "BULK_REEMIT", "RE"),
    info(Flag::BulkScatter, "BULK_SCATTER", "SC"),
    info(Flag::SurfaceDetect, "SURFACE_DETECT", "SD"),
    info(Flag::SurfaceAbsorb, "SURFACE_ABSORB", "SA"),
    info(Flag::SurfaceDreflect, "SURFACE_DREFLECT", "DR"),
    info(Flag::SurfaceSreflect, "SURFACE_SREFLECT", "SR"),
    info(Flag::BoundaryReflect, "BOUNDARY_REFLECT", "BR"),
    info(Flag::BoundaryTransmit, "BOUNDARY_TRANSMIT", "BT"),
    info(Flag::Torch, "TORCH", "TO"),
    info(Flag::NanAbort, "NAN_ABORT", "NA"),
    info(Flag::EfficiencyCollect, "EFFICIENCY_COLLECT", "EC"),
    info(Flag::EfficiencyCull, "EFFICIENCY_CULL", "EX"),
    info(Flag::Natural, "NATURAL", "NL"),
    info(Flag::DeferFstrackinfo, "DEFER_FSTRACKINFO", "YY"),
];

/// Canonical order of the name/abbreviation cross-reference.
/// Generation flags first, then bulk, surface, boundary and bookkeeping.
const PAIR_ORDER: [Flag; 18] = [
    Flag::Cerenkov,
    Flag::Scintillation,
    Flag::Torch,
    Flag::Miss,
    Flag::BulkAbsorb,
    Flag::BulkReemit,
    Flag::BulkScatter,
    Flag::SurfaceDetect,
    Flag::SurfaceAbsorb,
    Flag::SurfaceDreflect,
    Flag::SurfaceSreflect,
    Flag::BoundaryReflect,
    Flag::BoundaryTransmit,
    Flag::NanAbort,
    Flag::EfficiencyCull,
    Flag::EfficiencyCollect,
    Flag::Natural,
    Flag::DeferFstrackinfo,
];

impl Flag {
    /// Bit position (0-based).
    pub const fn bit_pos(self) -> u32 {
        self as u32
    }

    /// Single-bit flag value.
    pub const fn bits(self) -> u32 {
        0x1 << (self as u32)
    }

    /// Full name, e.g. `BULK_ABSORB`.
    pub fn name(self) -> &'static str {
        FLAG_TABLE[self as usize].name
    }

    /// Two-character abbreviation, e.g. `AB`.
    pub fn abbrev(self) -> &'static str {
        FLAG_TABLE[self as usize].abbrev
    }

    /// Flag at bit position `pos`, if enumerated.
    pub fn from_bit_pos(pos: u32) -> Option<Flag> {
        FLAG_TABLE.get(pos as usize).map(|row| row.flag)
    }

    /// Flag whose value is exactly `value`. Zero and multi-bit values give None.
    pub fn from_bits(value: u32) -> Option<Flag> {
        if value.is_power_of_two() {
            Flag::from_bit_pos(value.trailing_zeros())
        } else {
            None
        }
    }

    pub fn from_abbrev(abbrev: &str) -> Option<Flag> {
        FLAG_TABLE
            .iter()
            .find(|row| row.abbrev == abbrev)
            .map(|row| row.flag)
    }

    pub fn from_name(name: &str) -> Option<Flag> {
        FLAG_TABLE
            .iter()
            .find(|row| row.name == name)
            .map(|row| row.flag)
    }

    /// All flags in ascending bit order.
    pub fn all() -> impl Iterator<Item = Flag> {
        FLAG_TABLE.iter().map(|row| row.flag)
    }
}

/// Name for a raw flag value.
///
/// `0` is the never-written sentinel; anything that is not exactly one
/// enumerated bit falls back to the bad-flag name.
pub fn name_of(value: u32) -> &'static str {
    if value == 0 {
        return ZERO_NAME;
    }
    Flag::from_bits(value).map_or(BAD_FLAG_NAME, Flag::name)
}

/// Abbreviation for a raw flag value, with the same fallbacks as [`name_of`].
pub fn abbrev_of(value: u32) -> &'static str {
    if value == 0 {
        return ZERO_ABBREV;
    }
    Flag::from_bits(value).map_or(BAD_FLAG_ABBREV, Flag::abbrev)
}

/// Every enumerated (name, abbreviation) pair in canonical order.
/// Excludes the zero sentinel and the bad-flag fallback.
pub fn name_abbrev_pairs() -> Vec<(&'static str, &'static str)> {
    PAIR_ORDER
        .iter()
        .map(|flag| (flag.name(), flag.abbrev()))
        .collect()
}

// Category masks. Policy sets, not derived from bit order.

/// AB SA SD MI
pub const TERMINAL_MASK: u32 = Flag::BulkAbsorb.bits()
    | Flag::SurfaceAbsorb.bits()
    | Flag::SurfaceDetect.bits()
    | Flag::Miss.bits();

/// SD SA DR SR BR BT
pub const BOUNDARY_MASK: u32 = Flag::SurfaceDetect.bits()
    | Flag::SurfaceAbsorb.bits()
    | Flag::SurfaceDreflect.bits()
    | Flag::SurfaceSreflect.bits()
    | Flag::BoundaryReflect.bits()
    | Flag::BoundaryTransmit.bits();

/// AB SC RE TO CK SI
pub const BULK_MASK: u32 = Flag::BulkAbsorb.bits()
    | Flag::BulkScatter.bits()
    | Flag::BulkReemit.bits()
    | Flag::Torch.bits()
    | Flag::Cerenkov.bits()
    | Flag::Scintillation.bits();

/// SC BT BR DR SR RE
pub const LIVE_MASK: u32 = Flag::BulkScatter.bits()
    | Flag::BoundaryTransmit.bits()
    | Flag::BoundaryReflect.bits()
    | Flag::SurfaceDreflect.bits()
    | Flag::SurfaceSreflect.bits()
    | Flag::BulkReemit.bits();

/// BR DR SR
pub const REFLECT_MASK: u32 =
    Flag::BoundaryReflect.bits() | Flag::SurfaceDreflect.bits() | Flag::SurfaceSreflect.bits();

/// SD SA
pub const SURFACE_DETECT_OR_ABSORB_MASK: u32 =
    Flag::SurfaceDetect.bits() | Flag::SurfaceAbsorb.bits();

// Category tests use masked AND and accept combined masks.
// Single-event tests (`is_transmit`, `is_surface_detect`) use equality.

pub fn is_terminal(flag: u32) -> bool {
    flag & TERMINAL_MASK != 0
}

pub fn is_boundary(flag: u32) -> bool {
    flag & BOUNDARY_MASK != 0
}

pub fn is_bulk(flag: u32) -> bool {
    flag & BULK_MASK != 0
}

/// Photon continues after this step.
pub fn is_live(flag: u32) -> bool {
    flag & LIVE_MASK != 0
}

pub fn is_reflect(flag: u32) -> bool {
    flag & REFLECT_MASK != 0
}

/// Exactly BOUNDARY_TRANSMIT; a combined mask containing BT is not a transmit.
pub fn is_transmit(flag: u32) -> bool {
    flag == Flag::BoundaryTransmit.bits()
}

pub fn is_surface_detect_or_absorb(flag: u32) -> bool {
    flag & SURFACE_DETECT_OR_ABSORB_MASK != 0
}

/// Exactly SURFACE_DETECT.
pub fn is_surface_detect(flag: u32) -> bool {
    flag == Flag::SurfaceDetect.bits()
}

pub fn has_cerenkov(mask: u32) -> bool {
    mask & Flag::Cerenkov.bits() != 0
}

pub fn has_scintillation(mask: u32) -> bool {
    mask & Flag::Scintillation.bits() != 0
}

pub fn has_torch(mask: u32) -> bool {
    mask & Flag::Torch.bits() != 0
}
