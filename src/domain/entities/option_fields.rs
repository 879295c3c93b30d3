use serde::{Deserialize, Deserializer};

/// Represents optional field semantics in PATCH requests.
///
/// - `Unchanged` → field absent from the payload
/// - `SetToNull` → explicitly null
/// - `SetToValue` → set to provided value
///
/// Fields must be annotated with `#[serde(default)]` so that an absent key
/// deserializes to `Unchanged`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => OptionField::SetToValue(value),
            None => OptionField::SetToNull,
        })
    }
}

impl<T> OptionField<T> {
    /// Resolves the patch against the current value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            OptionField::Unchanged => current,
            OptionField::SetToNull => None,
            OptionField::SetToValue(v) => Some(v),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl<T> From<Option<Option<T>>> for OptionField<T> {
    fn from(opt: Option<Option<T>>) -> Self {
        match opt {
            None => OptionField::Unchanged,
            Some(None) => OptionField::SetToNull,
            Some(Some(v)) => OptionField::SetToValue(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default)]
        era: OptionField<String>,
    }

    #[test]
    fn absent_null_and_value_are_distinguished() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"era": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"era": "Modern"}"#).unwrap();

        assert!(absent.era.is_unchanged());
        assert_eq!(null.era, OptionField::SetToNull);
        assert_eq!(value.era.apply(Some("Romantic".into())), Some("Modern".to_string()));
    }

    #[test]
    fn unchanged_keeps_current_value() {
        let field: OptionField<String> = None.into();
        assert_eq!(field.apply(Some("Romantic".into())), Some("Romantic".to_string()));
        assert_eq!(OptionField::<String>::SetToNull.apply(Some("x".into())), None);
    }
}
