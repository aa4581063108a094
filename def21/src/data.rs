//!
//! # Def Data Model
//!
//! Shared primitives of the DEF routing model:
//! coordinates, orientations, keyword enumerations, versions, and the crate-wide error type.
//!

// Crates.io Imports
use derive_more::{Add, AddAssign, Sub, SubAssign};
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::enumstr::EnumStr;

/// # DefInt
///
/// Integer type of all DEF database-unit coordinates, widths, and offsets.
pub type DefInt = i32;

///
/// # DefDecimal
///
/// Decimal-valued data, primarily DEF version numbers.
/// Uses [rust_decimal](https://crates.io/crates/rust_decimal) internally.
///
pub type DefDecimal = rust_decimal::Decimal;

// Static short-hands for the DEF versions which gate writer features.
pub(crate) static V5P8: Lazy<DefDecimal> = Lazy::new(|| DefDecimal::new(58, 1));

/// # Def X-Y Point
///
/// Specified in integer database units.
/// Supports the common arithmetic operators (Add, Sub, increment, etc.).
#[derive(
    Clone,
    Copy,
    Default,
    Debug,
    Deserialize,
    Serialize,
    JsonSchema,
    PartialEq,
    Eq,
    Hash,
    Add,
    AddAssign,
    Sub,
    SubAssign,
)]
pub struct DefPoint {
    pub x: DefInt,
    pub y: DefInt,
}
impl DefPoint {
    /// Create a new [DefPoint]
    pub fn new(x: DefInt, y: DefInt) -> Self {
        Self { x, y }
    }
}
impl std::fmt::Display for DefPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "( {} {} )", self.x, self.y)
    }
}

enumstr!(
    /// # Def Orientation
    ///
    /// The eight placement orientations, in the order of their integer codes 0 through 7.
    DefOrient {
        N: "N",
        W: "W",
        S: "S",
        E: "E",
        FN: "FN",
        FW: "FW",
        FS: "FS",
        FE: "FE",
    }
);
impl DefOrient {
    /// Create from integer orientation-code `code`, in the range 0-7.
    /// Returns `None` for codes outside it.
    pub fn from_code(code: i32) -> Option<Self> {
        let idx = usize::try_from(code).ok()?;
        Self::variants().get(idx).copied()
    }
    /// Integer orientation-code of `self`
    pub fn code(&self) -> i32 {
        match self {
            Self::N => 0,
            Self::W => 1,
            Self::S => 2,
            Self::E => 3,
            Self::FN => 4,
            Self::FW => 5,
            Self::FS => 6,
            Self::FE => 7,
        }
    }
}
impl TryFrom<i32> for DefOrient {
    type Error = DefError;
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| DefError::Str(format!("Invalid orientation code {code}")))
    }
}

enumstr!(
    /// # Wire Route Status
    ///
    /// Leading keyword of each wire, e.g. the `ROUTED` in `+ ROUTED M1 ( 0 0 ) ...`.
    /// `SHIELD` is valid only in special nets, and is paired with the shielded net's name.
    DefRouteStatus {
        Cover: "COVER",
        Fixed: "FIXED",
        Routed: "ROUTED",
        NoShield: "NOSHIELD",
        Shield: "SHIELD",
    }
);

enumstr!(
    /// # Net Usage
    DefNetUse {
        Signal: "SIGNAL",
        Power: "POWER",
        Ground: "GROUND",
        Clock: "CLOCK",
        TieOff: "TIEOFF",
        Analog: "ANALOG",
        Scan: "SCAN",
        Reset: "RESET",
    }
);

/// # Net Kind
///
/// Whether a net is declared in the `NETS` or the `SPECIALNETS` section.
/// Special nets carry explicit wire widths and shapes, and far more paths per wire.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum NetKind {
    #[default]
    Regular,
    Special,
}

enumstr!(
    /// # Def Key(Word)s
    ///
    /// Enumerated keywords used in DEF routing generation.
    /// As in LEF, DEF keywords are context-dependent rather than reserved.
    /// [DefKey]s are always written in upper-case.
    ///
    DefKey {
        Version: "VERSION",
        Nets: "NETS",
        SpecialNets: "SPECIALNETS",
        End: "END",
        New: "NEW",
        Taper: "TAPER",
        TaperRule: "TAPERRULE",
        Shape: "SHAPE",
        Style: "STYLE",
        Mask: "MASK",
        Rect: "RECT",
        Virtual: "VIRTUAL",
        Do: "DO",
        By: "BY",
        Step: "STEP",
        MustJoin: "MUSTJOIN",
        Synthesized: "SYNTHESIZED",
        NonDefaultRule: "NONDEFAULTRULE",
        ShieldNet: "SHIELDNET",
        Subnet: "SUBNET",
        Use: "USE",
        Weight: "WEIGHT",
    }
);

/// # Def Error Enumeration
#[derive(Debug)]
pub enum DefError {
    /// Errors in an owner record's state, e.g. adding a wire-path to a net with no wires
    Owner { record: String, msg: String },
    /// Content not supported by the DEF version being written
    Version { key: DefKey, version: DefDecimal },
    /// Wrapped errors, generally from other crates
    Boxed(Box<dyn std::error::Error>),
    /// String message-valued errors
    Str(String),
}
impl DefError {
    /// Create an error-variant [Result] from a string-convertible message
    pub fn fail<T>(msg: impl Into<String>) -> DefResult<T> {
        Err(Self::Str(msg.into()))
    }
}
impl From<std::io::Error> for DefError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<serde_json::Error> for DefError {
    fn from(e: serde_json::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<serde_yaml::Error> for DefError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<toml::ser::Error> for DefError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<toml::de::Error> for DefError {
    fn from(e: toml::de::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<std::str::Utf8Error> for DefError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<String> for DefError {
    /// Convert string-based errors by wrapping them
    fn from(e: String) -> Self {
        Self::Str(e)
    }
}
impl From<&str> for DefError {
    /// Convert string-based errors by wrapping them
    fn from(e: &str) -> Self {
        Self::Str(e.into())
    }
}
impl std::fmt::Display for DefError {
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for DefError {}

/// Def21 Library-Wide Result Type
pub type DefResult<T> = Result<T, DefError>;
