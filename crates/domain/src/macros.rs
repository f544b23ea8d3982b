//! Macro for implementing Display and FromStr for wire-named enums
//!
//! Plan tiers and sync states arrive from the data store as free-form
//! strings. This macro maps each variant to a canonical lowercase name plus
//! optional aliases, parsing case-insensitively and always rendering the
//! canonical name.
//!
//! # Example
//!
//! ```rust
//! use wobbly_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Seat {
//!     Owner,
//!     Member,
//! }
//!
//! impl_wire_name_conversions!(Seat {
//!     Owner => "owner" | "admin",
//!     Member => "member",
//! });
//!
//! assert_eq!("ADMIN".parse::<Seat>().unwrap(), Seat::Owner);
//! assert_eq!(Seat::Owner.to_string(), "owner");
//! ```

/// Implements Display and FromStr for enums with canonical wire names
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $canonical | $alias...` - Canonical lowercase name used by
///   `Display`, followed by any number of extra accepted spellings
///
/// Surrounding whitespace is ignored when parsing.
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $canonical:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical wire name of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $canonical,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($canonical $(| $alias)* => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
