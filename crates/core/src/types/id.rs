//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Listing and account ids
//! come from the remote inventory API as opaque strings, so the wrappers hold a
//! validated `String` rather than a number.

/// Maximum accepted length of an id, in bytes.
pub const MAX_ID_LENGTH: usize = 128;

/// Errors that can occur when parsing an id.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is empty or whitespace only.
    #[error("id cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("id must be at most {max} bytes")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is a token reserved for internal use.
    #[error("id {0:?} is reserved")]
    Reserved(String),
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string, validated on deserialize
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `parse()`, `as_str()`, `into_inner()`
/// - `Display`, `FromStr`, `AsRef<str>`, `TryFrom<String>` and `Into<String>`
///
/// An optional `reserved = [...]` list names tokens the id may never take.
///
/// # Example
///
/// ```rust
/// # use autolot_core::define_id;
/// define_id!(DealerId);
/// define_id!(BranchId, reserved = ["default"]);
///
/// let dealer = DealerId::parse("d-1").unwrap();
/// assert_eq!(dealer.as_str(), "d-1");
/// assert!(BranchId::parse("default").is_err());
///
/// // These are different types, so this won't compile:
/// // let _: DealerId = BranchId::parse("b-1").unwrap();
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        $crate::define_id!($name, reserved = []);
    };
    ($name:ident, reserved = [$($reserved:literal),* $(,)?]) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Tokens this id type refuses to represent.
            pub const RESERVED: &'static [&'static str] = &[$($reserved),*];

            /// Parse an id, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is empty, too long, or reserved.
            pub fn parse(raw: &str) -> ::core::result::Result<Self, $crate::types::id::IdError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err($crate::types::id::IdError::Empty);
                }
                if trimmed.len() > $crate::types::id::MAX_ID_LENGTH {
                    return Err($crate::types::id::IdError::TooLong {
                        max: $crate::types::id::MAX_ID_LENGTH,
                    });
                }
                if Self::RESERVED.contains(&trimmed) {
                    return Err($crate::types::id::IdError::Reserved(trimmed.to_owned()));
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the id and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::types::id::IdError;

            fn try_from(raw: String) -> ::core::result::Result<Self, Self::Error> {
                Self::parse(&raw)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Vehicle listing ids, unique per listing in the inventory.
define_id!(ListingId);

// Account ids. `guest` is reserved so an account-scoped storage key can never
// alias the shared guest key.
define_id!(AccountId, reserved = ["guest"]);
