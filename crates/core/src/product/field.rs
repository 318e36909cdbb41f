//! Tri-state JSON field.

use serde::{Deserialize, Deserializer};

/// A JSON object member as sent by the client.
///
/// Use with `#[serde(default)]` so an absent member becomes [`Field::Missing`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    /// The member was not sent.
    #[default]
    Missing,
    /// The member was sent as `null`.
    Null,
    /// The member was sent with a value.
    Value(T),
}

impl<T> Field<T> {
    /// Returns true unless the member was absent.
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Missing)
    }

    /// Returns the value if one was sent.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing | Self::Null => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Self::Null, Self::Value))
    }
}
