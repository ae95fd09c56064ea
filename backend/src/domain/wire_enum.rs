//! Helper for closed string enumerations stored in documents and sent over
//! the wire (room types, statuses, specialties, ...).

use serde_json::json;

use crate::domain::Error;

/// Raised when a string does not name any variant of a wire enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {label}: {value}")]
pub struct UnknownVariant {
    label: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_owned(),
        }
    }

    /// Human label of the enumeration, e.g. `room type`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl From<UnknownVariant> for Error {
    fn from(value: UnknownVariant) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({
            "code": "unknown_variant",
            "value": value.value,
        }))
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $label:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name of the variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| $crate::domain::UnknownVariant::new($label, needle))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use wire_enum;
