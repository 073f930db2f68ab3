//! Helper macro for storage-generated numeric identifiers.

macro_rules! define_numeric_id {
    (
        $(#[$outer:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$outer])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw storage identifier.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Raw storage identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use define_numeric_id;
