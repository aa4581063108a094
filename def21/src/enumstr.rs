//!
//! # Keyword Enumerations
//!
//! DEF exposes most of its enumerated values as one of a fixed set of upper-case strings:
//! route statuses (`ROUTED`, `FIXED`), orientations (`N`, `FS`), net uses (`SIGNAL`, `POWER`), and the like.
//! The [enumstr] macro declares such an `enum` along with its paired strings,
//! and implements the [EnumStr] trait to convert in both directions.
//!

///
/// # String-Enumeration Trait
///
/// * `to_str` converts a variant to its (static) DEF string.
/// * `from_str` does the opposite, case-sensitively.
/// * `parse` does the same, case-insensitively, as DEF keywords are generally written.
/// * `variants` lists every variant in declaration order.
///
pub trait EnumStr: Sized + Copy + 'static {
    fn to_str(&self) -> &'static str;
    fn from_str(txt: &str) -> Option<Self>;
    fn variants() -> &'static [Self];

    /// Case-insensitive conversion from string.
    /// Every [EnumStr] string in this crate is upper-case, so `txt` is up-cased before matching.
    fn parse(txt: &str) -> Option<Self> {
        Self::from_str(&txt.to_ascii_uppercase())
    }
    /// Position of `self` in declaration order
    fn index(&self) -> usize {
        let s = self.to_str();
        Self::variants()
            .iter()
            .position(|v| v.to_str() == s)
            .unwrap_or_default()
    }
}

///
/// # Enum-String Pairing Macro
///
/// Declares a fieldless `enum` whose variants each pair with a string literal,
/// implementing [EnumStr] and [std::fmt::Display], and deriving serialization and schema support.
///
/// ```text
/// enumstr!(
///     /// Shield-or-not
///     ShieldState {
///         Shield: "SHIELD",
///         NoShield: "NOSHIELD",
///     }
/// );
/// ```
///
macro_rules! enumstr {
    (   $(#[$meta: meta])*
        $enum_name: ident {
        $( $variant: ident : $strval: literal ),* $(,)?
    }) => {
        $(#[$meta])*
        #[allow(dead_code)]
        #[derive(
            Clone, Copy, Debug, Hash, PartialEq, Eq,
            ::serde::Deserialize, ::serde::Serialize, ::schemars::JsonSchema,
        )]
        pub enum $enum_name {
            $( #[doc=$strval]
                $variant ),*
        }
        impl $crate::enumstr::EnumStr for $enum_name {
            fn to_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $strval),*,
                }
            }
            fn from_str(txt: &str) -> Option<Self> {
                match txt {
                    $( $strval => Some(Self::$variant)),*,
                    _ => None,
                }
            }
            fn variants() -> &'static [Self] {
                &[ $( Self::$variant ),* ]
            }
        }
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str($crate::enumstr::EnumStr::to_str(self))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enumstr!(
        /// Fixed-or-not, for testing
        Fixedness {
            Fixed: "FIXED",
            Floating: "FLOATING",
        }
    );

    #[test]
    fn test_enumstr() {
        assert_eq!(Fixedness::Fixed.to_str(), "FIXED");
        assert_eq!(Fixedness::Floating.to_string(), "FLOATING");

        assert_eq!(Fixedness::from_str("FIXED"), Some(Fixedness::Fixed));
        assert_eq!(Fixedness::from_str("fixed"), None);
        assert_eq!(Fixedness::parse("fixed"), Some(Fixedness::Fixed));
        assert_eq!(Fixedness::parse("Floating"), Some(Fixedness::Floating));
        assert_eq!(Fixedness::parse("STUCK"), None);

        assert_eq!(Fixedness::variants(), &[Fixedness::Fixed, Fixedness::Floating]);
        assert_eq!(Fixedness::Floating.index(), 1);
    }
}
