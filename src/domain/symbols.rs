//! Symbolic axes of the two profiling systems.
//!
//! Every enum here is a closed, enumerated key domain for one axis of a layer
//! table. Serialized names are camelCase; the Saju-side enums additionally accept
//! their Korean names on input (e.g. `"목"` for `wood`), because the upstream Saju
//! calculator emits those.
//!
//! Besides naming, a few axes carry the small amount of symbolic structure the
//! built-in tables are derived from (generating/controlling cycle positions,
//! stage vigor, aspect polarity, ...).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Position of one symbol relative to another on a five-step generating cycle.
///
/// Both the five elements and the five Sibsin families follow the same cycle:
/// each step generates the next one and controls the one after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CycleRelation {
    Same,
    /// `from` feeds `to`.
    Generates,
    /// `to` feeds `from`.
    GeneratedBy,
    /// `from` restrains `to`.
    Controls,
    /// `to` restrains `from`.
    ControlledBy,
}

impl CycleRelation {
    /// Relation between two cycle positions (`0..5`).
    pub fn between(from: usize, to: usize) -> Self {
        match (to % 5 + 5 - from % 5) % 5 {
            0 => CycleRelation::Same,
            1 => CycleRelation::Generates,
            2 => CycleRelation::Controls,
            3 => CycleRelation::ControlledBy,
            _ => CycleRelation::GeneratedBy,
        }
    }

    /// Raw 1..10 interaction score of the relation, before any intensity shaping.
    pub fn base_score(self) -> f64 {
        match self {
            CycleRelation::GeneratedBy => 9.0,
            CycleRelation::Same => 8.0,
            CycleRelation::Generates => 7.0,
            CycleRelation::Controls => 4.0,
            CycleRelation::ControlledBy => 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Saju side
// ---------------------------------------------------------------------------

/// The five Saju elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum FiveElement {
    #[serde(alias = "목")]
    Wood,
    #[serde(alias = "화")]
    Fire,
    #[serde(alias = "토")]
    Earth,
    #[serde(alias = "금")]
    Metal,
    #[serde(alias = "수")]
    Water,
}

impl FiveElement {
    pub const ALL: [FiveElement; 5] = [
        FiveElement::Wood,
        FiveElement::Fire,
        FiveElement::Earth,
        FiveElement::Metal,
        FiveElement::Water,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FiveElement::Wood => "wood",
            FiveElement::Fire => "fire",
            FiveElement::Earth => "earth",
            FiveElement::Metal => "metal",
            FiveElement::Water => "water",
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            FiveElement::Wood => "목",
            FiveElement::Fire => "화",
            FiveElement::Earth => "토",
            FiveElement::Metal => "금",
            FiveElement::Water => "수",
        }
    }

    fn cycle_index(self) -> usize {
        self as usize
    }

    pub fn relation_to(self, other: FiveElement) -> CycleRelation {
        CycleRelation::between(self.cycle_index(), other.cycle_index())
    }

    /// Fixed Saju → Western correspondence.
    ///
    /// Wood and metal both map to air; there is no Western counterpart for the
    /// wood/metal distinction.
    pub fn to_western(self) -> WesternElement {
        match self {
            FiveElement::Wood => WesternElement::Air,
            FiveElement::Fire => WesternElement::Fire,
            FiveElement::Earth => WesternElement::Earth,
            FiveElement::Metal => WesternElement::Air,
            FiveElement::Water => WesternElement::Water,
        }
    }
}

/// Ten role archetypes (Sibsin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sibsin {
    #[serde(alias = "비견")]
    Bigyeon,
    #[serde(alias = "겁재")]
    Geobjae,
    #[serde(alias = "식신")]
    Siksin,
    #[serde(alias = "상관")]
    Sanggwan,
    #[serde(alias = "편재")]
    Pyeonjae,
    #[serde(alias = "정재")]
    Jeongjae,
    #[serde(alias = "편관")]
    Pyeongwan,
    #[serde(alias = "정관")]
    Jeonggwan,
    #[serde(alias = "편인")]
    Pyeonin,
    #[serde(alias = "정인")]
    Jeongin,
}

impl Sibsin {
    pub const ALL: [Sibsin; 10] = [
        Sibsin::Bigyeon,
        Sibsin::Geobjae,
        Sibsin::Siksin,
        Sibsin::Sanggwan,
        Sibsin::Pyeonjae,
        Sibsin::Jeongjae,
        Sibsin::Pyeongwan,
        Sibsin::Jeonggwan,
        Sibsin::Pyeonin,
        Sibsin::Jeongin,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Sibsin::Bigyeon => "bigyeon",
            Sibsin::Geobjae => "geobjae",
            Sibsin::Siksin => "siksin",
            Sibsin::Sanggwan => "sanggwan",
            Sibsin::Pyeonjae => "pyeonjae",
            Sibsin::Jeongjae => "jeongjae",
            Sibsin::Pyeongwan => "pyeongwan",
            Sibsin::Jeonggwan => "jeonggwan",
            Sibsin::Pyeonin => "pyeonin",
            Sibsin::Jeongin => "jeongin",
        }
    }

    pub fn family(self) -> SibsinFamily {
        match self {
            Sibsin::Bigyeon | Sibsin::Geobjae => SibsinFamily::Peer,
            Sibsin::Siksin | Sibsin::Sanggwan => SibsinFamily::Output,
            Sibsin::Pyeonjae | Sibsin::Jeongjae => SibsinFamily::Wealth,
            Sibsin::Pyeongwan | Sibsin::Jeonggwan => SibsinFamily::Officer,
            Sibsin::Pyeonin | Sibsin::Jeongin => SibsinFamily::Resource,
        }
    }

    /// Balanced ("direct") roles; the other five are the volatile counterparts.
    pub fn is_direct(self) -> bool {
        matches!(
            self,
            Sibsin::Bigyeon | Sibsin::Siksin | Sibsin::Jeongjae | Sibsin::Jeonggwan | Sibsin::Jeongin
        )
    }
}

/// The five Sibsin families, in generating-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SibsinFamily {
    Peer,
    Output,
    Wealth,
    Officer,
    Resource,
}

impl SibsinFamily {
    pub fn relation_to(self, other: SibsinFamily) -> CycleRelation {
        CycleRelation::between(self as usize, other as usize)
    }
}

/// Twelve life stages (십이운성).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TwelveStage {
    #[serde(alias = "장생")]
    Jangsaeng,
    #[serde(alias = "목욕")]
    Mokyok,
    #[serde(alias = "관대")]
    Gwandae,
    #[serde(alias = "건록", alias = "임관")]
    Geonrok,
    #[serde(alias = "제왕")]
    Jewang,
    #[serde(alias = "쇠")]
    Soe,
    #[serde(alias = "병")]
    Byeong,
    #[serde(alias = "사")]
    Sa,
    #[serde(alias = "묘")]
    Myo,
    #[serde(alias = "절")]
    Jeol,
    #[serde(alias = "태")]
    Tae,
    #[serde(alias = "양")]
    Yang,
}

impl TwelveStage {
    pub const ALL: [TwelveStage; 12] = [
        TwelveStage::Jangsaeng,
        TwelveStage::Mokyok,
        TwelveStage::Gwandae,
        TwelveStage::Geonrok,
        TwelveStage::Jewang,
        TwelveStage::Soe,
        TwelveStage::Byeong,
        TwelveStage::Sa,
        TwelveStage::Myo,
        TwelveStage::Jeol,
        TwelveStage::Tae,
        TwelveStage::Yang,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TwelveStage::Jangsaeng => "jangsaeng",
            TwelveStage::Mokyok => "mokyok",
            TwelveStage::Gwandae => "gwandae",
            TwelveStage::Geonrok => "geonrok",
            TwelveStage::Jewang => "jewang",
            TwelveStage::Soe => "soe",
            TwelveStage::Byeong => "byeong",
            TwelveStage::Sa => "sa",
            TwelveStage::Myo => "myo",
            TwelveStage::Jeol => "jeol",
            TwelveStage::Tae => "tae",
            TwelveStage::Yang => "yang",
        }
    }

    /// Vitality of the stage on a 1..10 scale (peak at `jewang`, trough at `jeol`).
    pub fn vigor(self) -> f64 {
        match self {
            TwelveStage::Jangsaeng => 7.0,
            TwelveStage::Mokyok => 5.0,
            TwelveStage::Gwandae => 7.0,
            TwelveStage::Geonrok => 8.0,
            TwelveStage::Jewang => 9.0,
            TwelveStage::Soe => 5.0,
            TwelveStage::Byeong => 4.0,
            TwelveStage::Sa => 3.0,
            TwelveStage::Myo => 4.0,
            TwelveStage::Jeol => 2.0,
            TwelveStage::Tae => 5.0,
            TwelveStage::Yang => 6.0,
        }
    }
}

/// Branch/stem relation kinds detected between pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    #[serde(alias = "육합", alias = "합")]
    Yukhap,
    #[serde(alias = "삼합")]
    Samhap,
    #[serde(alias = "방합")]
    Banghap,
    #[serde(alias = "충")]
    Chung,
    #[serde(alias = "형")]
    Hyeong,
    #[serde(alias = "파")]
    Pa,
    #[serde(alias = "해")]
    Hae,
    #[serde(alias = "원진")]
    Wonjin,
}

impl RelationKind {
    pub const ALL: [RelationKind; 8] = [
        RelationKind::Yukhap,
        RelationKind::Samhap,
        RelationKind::Banghap,
        RelationKind::Chung,
        RelationKind::Hyeong,
        RelationKind::Pa,
        RelationKind::Hae,
        RelationKind::Wonjin,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RelationKind::Yukhap => "yukhap",
            RelationKind::Samhap => "samhap",
            RelationKind::Banghap => "banghap",
            RelationKind::Chung => "chung",
            RelationKind::Hyeong => "hyeong",
            RelationKind::Pa => "pa",
            RelationKind::Hae => "hae",
            RelationKind::Wonjin => "wonjin",
        }
    }

    /// Harmony polarity in `[-2, 2]` (combinations positive, clashes negative).
    pub fn polarity(self) -> f64 {
        match self {
            RelationKind::Samhap => 2.0,
            RelationKind::Yukhap => 1.5,
            RelationKind::Banghap => 1.0,
            RelationKind::Wonjin => -0.5,
            RelationKind::Pa | RelationKind::Hae => -1.0,
            RelationKind::Hyeong => -1.5,
            RelationKind::Chung => -2.0,
        }
    }
}

/// Overall chart pattern (격국).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Geokguk {
    #[serde(alias = "정관격")]
    Jeonggwan,
    #[serde(alias = "편관격", alias = "칠살격")]
    Pyeongwan,
    #[serde(alias = "정인격")]
    Jeongin,
    #[serde(alias = "편인격")]
    Pyeonin,
    #[serde(alias = "식신격")]
    Siksin,
    #[serde(alias = "상관격")]
    Sanggwan,
    #[serde(alias = "정재격")]
    Jeongjae,
    #[serde(alias = "편재격")]
    Pyeonjae,
    #[serde(alias = "건록격")]
    Geonrok,
    #[serde(alias = "양인격")]
    Yangin,
    #[serde(alias = "종격")]
    Jonggyeok,
}

impl Geokguk {
    pub const ALL: [Geokguk; 11] = [
        Geokguk::Jeonggwan,
        Geokguk::Pyeongwan,
        Geokguk::Jeongin,
        Geokguk::Pyeonin,
        Geokguk::Siksin,
        Geokguk::Sanggwan,
        Geokguk::Jeongjae,
        Geokguk::Pyeonjae,
        Geokguk::Geonrok,
        Geokguk::Yangin,
        Geokguk::Jonggyeok,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Geokguk::Jeonggwan => "jeonggwan",
            Geokguk::Pyeongwan => "pyeongwan",
            Geokguk::Jeongin => "jeongin",
            Geokguk::Pyeonin => "pyeonin",
            Geokguk::Siksin => "siksin",
            Geokguk::Sanggwan => "sanggwan",
            Geokguk::Jeongjae => "jeongjae",
            Geokguk::Pyeonjae => "pyeonjae",
            Geokguk::Geonrok => "geonrok",
            Geokguk::Yangin => "yangin",
            Geokguk::Jonggyeok => "jonggyeok",
        }
    }

    /// Role family the pattern is built around; follow patterns have none.
    pub fn family(self) -> Option<SibsinFamily> {
        match self {
            Geokguk::Jeonggwan | Geokguk::Pyeongwan => Some(SibsinFamily::Officer),
            Geokguk::Jeongin | Geokguk::Pyeonin => Some(SibsinFamily::Resource),
            Geokguk::Siksin | Geokguk::Sanggwan => Some(SibsinFamily::Output),
            Geokguk::Jeongjae | Geokguk::Pyeonjae => Some(SibsinFamily::Wealth),
            Geokguk::Geonrok | Geokguk::Yangin => Some(SibsinFamily::Peer),
            Geokguk::Jonggyeok => None,
        }
    }
}

/// Nature of a special marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShinsalNature {
    Auspicious,
    Mixed,
    Harsh,
}

/// Special symbolic markers (신살).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shinsal {
    #[serde(alias = "천을귀인")]
    Cheoneul,
    #[serde(alias = "도화")]
    Dohwa,
    #[serde(alias = "역마")]
    Yeokma,
    #[serde(alias = "화개")]
    Hwagae,
    #[serde(alias = "양인")]
    Yangin,
    #[serde(alias = "백호")]
    Baekho,
    #[serde(alias = "괴강")]
    Goegang,
    #[serde(alias = "홍염")]
    Hongyeom,
    #[serde(alias = "문창")]
    Munchang,
    #[serde(alias = "겁살")]
    Geobsal,
    #[serde(alias = "재살")]
    Jaesal,
    #[serde(alias = "망신")]
    Mangsin,
}

impl Shinsal {
    pub const ALL: [Shinsal; 12] = [
        Shinsal::Cheoneul,
        Shinsal::Dohwa,
        Shinsal::Yeokma,
        Shinsal::Hwagae,
        Shinsal::Yangin,
        Shinsal::Baekho,
        Shinsal::Goegang,
        Shinsal::Hongyeom,
        Shinsal::Munchang,
        Shinsal::Geobsal,
        Shinsal::Jaesal,
        Shinsal::Mangsin,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Shinsal::Cheoneul => "cheoneul",
            Shinsal::Dohwa => "dohwa",
            Shinsal::Yeokma => "yeokma",
            Shinsal::Hwagae => "hwagae",
            Shinsal::Yangin => "yangin",
            Shinsal::Baekho => "baekho",
            Shinsal::Goegang => "goegang",
            Shinsal::Hongyeom => "hongyeom",
            Shinsal::Munchang => "munchang",
            Shinsal::Geobsal => "geobsal",
            Shinsal::Jaesal => "jaesal",
            Shinsal::Mangsin => "mangsin",
        }
    }

    pub fn nature(self) -> ShinsalNature {
        match self {
            Shinsal::Cheoneul | Shinsal::Munchang => ShinsalNature::Auspicious,
            Shinsal::Dohwa | Shinsal::Yeokma | Shinsal::Hwagae | Shinsal::Hongyeom | Shinsal::Goegang => {
                ShinsalNature::Mixed
            }
            Shinsal::Yangin | Shinsal::Baekho | Shinsal::Geobsal | Shinsal::Jaesal | Shinsal::Mangsin => {
                ShinsalNature::Harsh
            }
        }
    }

    /// Planets that resonate with the marker's theme.
    pub fn affine_planets(self) -> &'static [Planet] {
        match self {
            Shinsal::Cheoneul => &[Planet::Jupiter, Planet::Sun],
            Shinsal::Dohwa => &[Planet::Venus, Planet::Moon],
            Shinsal::Yeokma => &[Planet::Mercury, Planet::Uranus],
            Shinsal::Hwagae => &[Planet::Neptune, Planet::Saturn],
            Shinsal::Yangin => &[Planet::Mars, Planet::Pluto],
            Shinsal::Baekho => &[Planet::Mars, Planet::Saturn],
            Shinsal::Goegang => &[Planet::Saturn, Planet::Pluto],
            Shinsal::Hongyeom => &[Planet::Venus, Planet::Neptune],
            Shinsal::Munchang => &[Planet::Mercury, Planet::Jupiter],
            Shinsal::Geobsal => &[Planet::Mars, Planet::Pluto],
            Shinsal::Jaesal => &[Planet::Saturn, Planet::Uranus],
            Shinsal::Mangsin => &[Planet::Moon, Planet::Neptune],
        }
    }
}

// ---------------------------------------------------------------------------
// Astrology side
// ---------------------------------------------------------------------------

/// The four Western elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum WesternElement {
    Fire,
    Earth,
    Air,
    Water,
}

impl WesternElement {
    pub const ALL: [WesternElement; 4] = [
        WesternElement::Fire,
        WesternElement::Earth,
        WesternElement::Air,
        WesternElement::Water,
    ];

    pub fn key(self) -> &'static str {
        match self {
            WesternElement::Fire => "fire",
            WesternElement::Earth => "earth",
            WesternElement::Air => "air",
            WesternElement::Water => "water",
        }
    }

    /// Closest Saju element (air is read as metal).
    pub fn to_five(self) -> FiveElement {
        match self {
            WesternElement::Fire => FiveElement::Fire,
            WesternElement::Earth => FiveElement::Earth,
            WesternElement::Air => FiveElement::Metal,
            WesternElement::Water => FiveElement::Water,
        }
    }
}

/// Natal planets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    pub const ALL: [Planet; 10] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Planet::Sun => "sun",
            Planet::Moon => "moon",
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
            Planet::Uranus => "uranus",
            Planet::Neptune => "neptune",
            Planet::Pluto => "pluto",
        }
    }

    /// Role family the planet's archetype belongs to.
    pub fn family(self) -> SibsinFamily {
        match self {
            Planet::Sun | Planet::Mars => SibsinFamily::Peer,
            Planet::Mercury | Planet::Uranus => SibsinFamily::Output,
            Planet::Venus | Planet::Jupiter => SibsinFamily::Wealth,
            Planet::Saturn | Planet::Pluto => SibsinFamily::Officer,
            Planet::Moon | Planet::Neptune => SibsinFamily::Resource,
        }
    }
}

/// Zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn key(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }

    pub fn element(self) -> WesternElement {
        match self {
            ZodiacSign::Aries | ZodiacSign::Leo | ZodiacSign::Sagittarius => WesternElement::Fire,
            ZodiacSign::Taurus | ZodiacSign::Virgo | ZodiacSign::Capricorn => WesternElement::Earth,
            ZodiacSign::Gemini | ZodiacSign::Libra | ZodiacSign::Aquarius => WesternElement::Air,
            ZodiacSign::Cancer | ZodiacSign::Scorpio | ZodiacSign::Pisces => WesternElement::Water,
        }
    }
}

/// Angular relationship between two planets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    Quincunx,
    Semisextile,
    Quintile,
    Biquintile,
}

impl AspectType {
    pub const ALL: [AspectType; 9] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
        AspectType::Quincunx,
        AspectType::Semisextile,
        AspectType::Quintile,
        AspectType::Biquintile,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Opposition => "opposition",
            AspectType::Quincunx => "quincunx",
            AspectType::Semisextile => "semisextile",
            AspectType::Quintile => "quintile",
            AspectType::Biquintile => "biquintile",
        }
    }

    /// Exact angle in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Semisextile => 30.0,
            AspectType::Sextile => 60.0,
            AspectType::Quintile => 72.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Biquintile => 144.0,
            AspectType::Quincunx => 150.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Harmony polarity in `[-2, 2]`. A conjunction is neutral: it intensifies
    /// whatever it is paired with.
    pub fn polarity(self) -> f64 {
        match self {
            AspectType::Trine => 2.0,
            AspectType::Sextile | AspectType::Quintile | AspectType::Biquintile => 1.0,
            AspectType::Semisextile => 0.5,
            AspectType::Conjunction => 0.0,
            AspectType::Quincunx => -0.5,
            AspectType::Square => -1.5,
            AspectType::Opposition => -2.0,
        }
    }
}

/// Named Western timing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitCycle {
    SaturnReturn,
    JupiterReturn,
    UranusSquare,
    NeptuneSquare,
    PlutoTransit,
    NodeReturn,
    Eclipse,
    MercuryRetrograde,
    VenusRetrograde,
    MarsRetrograde,
    JupiterRetrograde,
    SaturnRetrograde,
}

impl TransitCycle {
    pub const ALL: [TransitCycle; 12] = [
        TransitCycle::SaturnReturn,
        TransitCycle::JupiterReturn,
        TransitCycle::UranusSquare,
        TransitCycle::NeptuneSquare,
        TransitCycle::PlutoTransit,
        TransitCycle::NodeReturn,
        TransitCycle::Eclipse,
        TransitCycle::MercuryRetrograde,
        TransitCycle::VenusRetrograde,
        TransitCycle::MarsRetrograde,
        TransitCycle::JupiterRetrograde,
        TransitCycle::SaturnRetrograde,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TransitCycle::SaturnReturn => "saturnReturn",
            TransitCycle::JupiterReturn => "jupiterReturn",
            TransitCycle::UranusSquare => "uranusSquare",
            TransitCycle::NeptuneSquare => "neptuneSquare",
            TransitCycle::PlutoTransit => "plutoTransit",
            TransitCycle::NodeReturn => "nodeReturn",
            TransitCycle::Eclipse => "eclipse",
            TransitCycle::MercuryRetrograde => "mercuryRetrograde",
            TransitCycle::VenusRetrograde => "venusRetrograde",
            TransitCycle::MarsRetrograde => "marsRetrograde",
            TransitCycle::JupiterRetrograde => "jupiterRetrograde",
            TransitCycle::SaturnRetrograde => "saturnRetrograde",
        }
    }

    /// Dominant Western element of the cycle.
    pub fn western_element(self) -> WesternElement {
        match self {
            TransitCycle::SaturnReturn | TransitCycle::VenusRetrograde | TransitCycle::SaturnRetrograde => {
                WesternElement::Earth
            }
            TransitCycle::JupiterReturn | TransitCycle::MarsRetrograde | TransitCycle::JupiterRetrograde => {
                WesternElement::Fire
            }
            TransitCycle::UranusSquare | TransitCycle::NodeReturn | TransitCycle::MercuryRetrograde => {
                WesternElement::Air
            }
            TransitCycle::NeptuneSquare | TransitCycle::PlutoTransit | TransitCycle::Eclipse => {
                WesternElement::Water
            }
        }
    }

    /// Returns, node return, eclipses and Pluto transits.
    pub fn is_high_impact(self) -> bool {
        matches!(
            self,
            TransitCycle::SaturnReturn
                | TransitCycle::JupiterReturn
                | TransitCycle::NodeReturn
                | TransitCycle::Eclipse
                | TransitCycle::PlutoTransit
        )
    }

    pub fn is_retrograde(self) -> bool {
        matches!(
            self,
            TransitCycle::MercuryRetrograde
                | TransitCycle::VenusRetrograde
                | TransitCycle::MarsRetrograde
                | TransitCycle::JupiterRetrograde
                | TransitCycle::SaturnRetrograde
        )
    }
}

/// Progression / return techniques crossed against the chart pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressionType {
    Secondary,
    SolarArc,
    SolarReturn,
    LunarReturn,
    Draconic,
    Harmonics,
}

impl ProgressionType {
    pub const ALL: [ProgressionType; 6] = [
        ProgressionType::Secondary,
        ProgressionType::SolarArc,
        ProgressionType::SolarReturn,
        ProgressionType::LunarReturn,
        ProgressionType::Draconic,
        ProgressionType::Harmonics,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProgressionType::Secondary => "secondary",
            ProgressionType::SolarArc => "solarArc",
            ProgressionType::SolarReturn => "solarReturn",
            ProgressionType::LunarReturn => "lunarReturn",
            ProgressionType::Draconic => "draconic",
            ProgressionType::Harmonics => "harmonics",
        }
    }

    pub fn family(self) -> SibsinFamily {
        match self {
            ProgressionType::Secondary | ProgressionType::Draconic => SibsinFamily::Resource,
            ProgressionType::SolarArc => SibsinFamily::Officer,
            ProgressionType::SolarReturn => SibsinFamily::Peer,
            ProgressionType::LunarReturn => SibsinFamily::Output,
            ProgressionType::Harmonics => SibsinFamily::Wealth,
        }
    }

    pub fn element(self) -> FiveElement {
        match self {
            ProgressionType::Secondary | ProgressionType::LunarReturn => FiveElement::Water,
            ProgressionType::SolarArc => FiveElement::Metal,
            ProgressionType::SolarReturn => FiveElement::Fire,
            ProgressionType::Draconic => FiveElement::Wood,
            ProgressionType::Harmonics => FiveElement::Earth,
        }
    }
}

/// Main-belt asteroids tracked by the astrology module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Asteroid {
    Ceres,
    Pallas,
    Juno,
    Vesta,
}

impl Asteroid {
    pub const ALL: [Asteroid; 4] = [Asteroid::Ceres, Asteroid::Pallas, Asteroid::Juno, Asteroid::Vesta];

    pub fn key(self) -> &'static str {
        match self {
            Asteroid::Ceres => "ceres",
            Asteroid::Pallas => "pallas",
            Asteroid::Juno => "juno",
            Asteroid::Vesta => "vesta",
        }
    }

    /// Houses where the asteroid's theme is at home.
    pub fn home_houses(self) -> &'static [u8] {
        match self {
            Asteroid::Ceres => &[4, 6],
            Asteroid::Pallas => &[3, 9],
            Asteroid::Juno => &[7, 8],
            Asteroid::Vesta => &[6, 12],
        }
    }
}

/// Sensitive points that are not bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtraPoint {
    Chiron,
    Lilith,
    PartOfFortune,
    Vertex,
    NorthNode,
    SouthNode,
}

impl ExtraPoint {
    pub const ALL: [ExtraPoint; 6] = [
        ExtraPoint::Chiron,
        ExtraPoint::Lilith,
        ExtraPoint::PartOfFortune,
        ExtraPoint::Vertex,
        ExtraPoint::NorthNode,
        ExtraPoint::SouthNode,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ExtraPoint::Chiron => "chiron",
            ExtraPoint::Lilith => "lilith",
            ExtraPoint::PartOfFortune => "partOfFortune",
            ExtraPoint::Vertex => "vertex",
            ExtraPoint::NorthNode => "northNode",
            ExtraPoint::SouthNode => "southNode",
        }
    }

    pub fn family(self) -> SibsinFamily {
        match self {
            ExtraPoint::Chiron | ExtraPoint::SouthNode => SibsinFamily::Resource,
            ExtraPoint::Lilith => SibsinFamily::Output,
            ExtraPoint::PartOfFortune => SibsinFamily::Wealth,
            ExtraPoint::Vertex => SibsinFamily::Peer,
            ExtraPoint::NorthNode => SibsinFamily::Officer,
        }
    }

    /// Points whose influence is read as volatile rather than steady.
    pub fn is_volatile(self) -> bool {
        matches!(self, ExtraPoint::Lilith | ExtraPoint::SouthNode)
    }
}

/// House modality: angular houses amplify, cadent houses dampen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HouseModality {
    Angular,
    Succedent,
    Cadent,
}

impl HouseModality {
    /// Returns `None` for anything outside `1..=12`.
    pub fn of(house: u8) -> Option<Self> {
        match house {
            1 | 4 | 7 | 10 => Some(HouseModality::Angular),
            2 | 5 | 8 | 11 => Some(HouseModality::Succedent),
            3 | 6 | 9 | 12 => Some(HouseModality::Cadent),
            _ => None,
        }
    }

    pub fn intensity(self) -> f64 {
        match self {
            HouseModality::Angular => 1.25,
            HouseModality::Succedent => 1.0,
            HouseModality::Cadent => 0.8,
        }
    }
}

/// Role family a house's life area belongs to.
pub fn house_family(house: u8) -> Option<SibsinFamily> {
    match house {
        1 | 7 | 11 => Some(SibsinFamily::Peer),
        3 | 5 => Some(SibsinFamily::Output),
        2 | 8 => Some(SibsinFamily::Wealth),
        6 | 10 => Some(SibsinFamily::Officer),
        4 | 9 | 12 => Some(SibsinFamily::Resource),
        _ => None,
    }
}

/// Table key of a house (`"1"`..`"12"`).
pub fn house_key(house: u8) -> String {
    house.to_string()
}

// ---------------------------------------------------------------------------
// Output axes
// ---------------------------------------------------------------------------

/// Five life domains that layer scores are re-projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum Domain {
    Career,
    Love,
    Money,
    Health,
    Move,
}

impl Domain {
    pub const ALL: [Domain; 5] = [Domain::Career, Domain::Love, Domain::Money, Domain::Health, Domain::Move];

    pub fn key(self) -> &'static str {
        match self {
            Domain::Career => "career",
            Domain::Love => "love",
            Domain::Money => "money",
            Domain::Health => "health",
            Domain::Move => "move",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Domain::Career => "Career",
            Domain::Love => "Love",
            Domain::Money => "Money",
            Domain::Health => "Health",
            Domain::Move => "Move/Change",
        }
    }

    /// Column of this domain in the layer → domain weight table.
    pub fn index(self) -> usize {
        self as usize
    }
}
