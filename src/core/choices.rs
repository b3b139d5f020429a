//! Fixed choice lists stored as short text codes.

use std::str::FromStr;

/// Declares a choice enum stored as a lowercase code with a display label.
///
/// Generates `as_str`, `label`, `ALL`, `Display`, `FromStr` and serde
/// renames so the JSON representation matches the stored code.
#[macro_export]
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Case-insensitive match on either the code or the label
            pub fn from_code_or_label(value: &str) -> Option<Self> {
                let value = value.trim();
                Self::ALL.iter().copied().find(|choice| {
                    choice.as_str().eq_ignore_ascii_case(value)
                        || choice.label().eq_ignore_ascii_case(value)
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($name), s)),
                }
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
        default $default:ident
    ) => {
        $crate::choice_enum! {
            $(#[$meta])*
            $vis enum $name {
                $($variant => ($code, $label)),+
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }
    };
}

/// Parses a stored code, falling back to the type's default for values this
/// build does not know (rows written by older releases).
pub fn parse_stored<T>(column: &str, value: &str) -> T
where
    T: FromStr + Default,
{
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(column, value, "Unrecognized stored choice, using default");
        T::default()
    })
}

/// Like [`parse_stored`] for columns where blank means "not set".
pub fn parse_stored_optional<T>(column: &str, value: &str) -> Option<T>
where
    T: FromStr,
{
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(column, value, "Unrecognized stored choice, treating as unset");
            None
        }
    }
}
