//! Serde helpers for open-ended upper bounds.
//!
//! JSON has no infinity, so an unbounded upper limit (`f64::INFINITY`) is
//! written as `null` and read back as `f64::INFINITY`.

/// `#[serde(with = "upper_bound")]` for plain `f64` upper limits.
pub mod upper_bound {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// `#[serde(with = "optional_upper_bound")]` for upper limits that may not apply at all.
///
/// Pair with `default` and `skip_serializing_if = "Option::is_none"`: an absent
/// field means "not applicable", a `null` field means "unbounded".
pub mod optional_upper_bound {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => super::upper_bound::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Ok(Some(
            Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY),
        ))
    }
}
