use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Legacy per-size stock stored as JSON text on the product row.
///
/// Two shapes exist in the wild: `{"M": 4}` and `{"M": {"Blue": 4}}`.
/// Anything else, including an empty object, is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeStock {
    Flat(BTreeMap<String, i64>),
    Nested(BTreeMap<String, BTreeMap<String, i64>>),
    Absent,
}

#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum RawSizeStock {
    Flat(BTreeMap<String, i64>),
    Nested(BTreeMap<String, BTreeMap<String, i64>>),
}

/// Quantity found in a legacy map, together with the color it is scoped to.
///
/// `color` is `None` for flat maps, where every color of a size draws from
/// the same pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacySlot {
    pub quantity: i64,
    pub color: Option<String>,
}

impl SizeStock {
    pub fn try_parse(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed = match serde_json::from_str::<RawSizeStock>(raw)? {
            RawSizeStock::Flat(map) if map.is_empty() => SizeStock::Absent,
            RawSizeStock::Flat(map) => SizeStock::Flat(map),
            RawSizeStock::Nested(map) if map.is_empty() => SizeStock::Absent,
            RawSizeStock::Nested(map) => SizeStock::Nested(map),
        };
        Ok(parsed)
    }

    /// Parse the column value, downgrading malformed data to `Absent`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return SizeStock::Absent;
        };
        match Self::try_parse(raw) {
            Ok(stock) => stock,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed size_stock");
                SizeStock::Absent
            }
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, SizeStock::Absent)
    }

    /// Look up the slot for `size` (and `color` for nested maps).
    ///
    /// Returns `None` only when there is no legacy map at all. A map that
    /// simply lacks the entry yields a zero quantity.
    pub fn slot(&self, size: &str, color: Option<&str>) -> Option<LegacySlot> {
        match self {
            SizeStock::Absent => None,
            SizeStock::Flat(map) => Some(LegacySlot {
                quantity: map.get(size).copied().unwrap_or(0),
                color: None,
            }),
            SizeStock::Nested(map) => {
                let quantity = color
                    .and_then(|c| map.get(size).and_then(|colors| colors.get(c)))
                    .copied()
                    .unwrap_or(0);
                Some(LegacySlot {
                    quantity,
                    color: color.map(str::to_owned),
                })
            }
        }
    }

    /// Remove `quantity` units from the slot. Fails when the slot is missing
    /// or holds fewer units than requested; the map is left untouched then.
    pub fn decrement(&mut self, size: &str, color: Option<&str>, quantity: i64) -> bool {
        let entry = match self {
            SizeStock::Absent => None,
            SizeStock::Flat(map) => map.get_mut(size),
            SizeStock::Nested(map) => color.and_then(|c| map.get_mut(size)?.get_mut(c)),
        };
        match entry {
            Some(current) if *current >= quantity => {
                *current -= quantity;
                true
            }
            _ => false,
        }
    }

    pub fn to_json(&self) -> Option<String> {
        let raw = match self {
            SizeStock::Absent => return None,
            SizeStock::Flat(map) => RawSizeStock::Flat(map.clone()),
            SizeStock::Nested(map) => RawSizeStock::Nested(map.clone()),
        };
        serde_json::to_string(&raw).ok()
    }
}
