// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record identifiers

/// Define a newtype ID wrapper around `SmolStr` with a type prefix.
///
/// Freshly generated IDs have the form `{prefix}{nanoid}`. IDs read back from
/// storage keep whatever text they were saved with; older deployments used
/// millisecond timestamps, which round-trip unchanged.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct ProjectId("prj-");
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($prefix:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Generate a new random ID with the type prefix
            pub fn generate() -> Self {
                Self(smol_str::SmolStr::new(format!("{}{}", Self::PREFIX, nanoid::nanoid!(12))))
            }

            /// Wrap an existing identifier (parsing, deserialization, CLI input)
            pub fn new(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the ID is an empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Identifier of an obra (construction project).
    pub struct ProjectId("prj-");
}

define_id! {
    /// Identifier of an employee on the company roster.
    pub struct EmployeeId("emp-");
}

define_id! {
    /// Identifier of a record nested inside a project (report, purchase,
    /// photo, contract).
    pub struct RecordId("rec-");
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
