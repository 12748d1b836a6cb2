use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One arm of an experiment as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// Natural identifier. Real datasets carry it; ad-hoc ones may not.
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub natural_id: Option<i64>,
    pub name: String,
}

impl Variation {
    #[must_use]
    pub fn new(natural_id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            natural_id,
            name: name.into(),
        }
    }
}

/// Variation with the key used to address its series for one load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancedVariation {
    pub natural_id: Option<i64>,
    pub name: String,
    pub stable_id: String,
}

impl EnhancedVariation {
    /// String form of the natural id, used as the secondary lookup key.
    #[must_use]
    pub fn natural_key(&self) -> Option<String> {
        self.natural_id.map(|id| id.to_string())
    }
}

/// Per-variation counters of one day, keyed by stable id or natural id.
///
/// Lookups go through [`CountMap::resolve`]: stable id first, then the
/// natural-id string, then zero. Values that are not numbers (or numeric
/// strings) are dropped while decoding, so they behave like absent keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CountMap(IndexMap<String, f64>);

impl CountMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a counter; non-finite values are ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        if value.is_finite() {
            self.0.insert(key.into(), value);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Two-tier lookup used by rate computation.
    ///
    /// A zero under the stable id still falls through to the natural key,
    /// so datasets keyed by raw ids win over placeholder entries.
    #[must_use]
    pub fn resolve(&self, variation: &EnhancedVariation) -> f64 {
        if let Some(value) = self.get(&variation.stable_id).filter(|v| *v != 0.0) {
            return value;
        }
        variation
            .natural_key()
            .and_then(|key| self.get(&key))
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for CountMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut out = CountMap::new();
        for (key, value) in raw {
            if let Some(number) = coerce_count(&value) {
                out.insert(key, number);
            }
        }
        Ok(out)
    }
}

fn coerce_count(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

/// Raw counters for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: String,
    #[serde(default)]
    pub visits: CountMap,
    #[serde(default)]
    pub conversions: CountMap,
}

impl DailyRecord {
    #[must_use]
    pub fn new(date: impl Into<String>, visits: CountMap, conversions: CountMap) -> Self {
        Self {
            date: date.into(),
            visits,
            conversions,
        }
    }
}

/// Document shape served by the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestData {
    #[serde(default)]
    pub variations: Vec<Variation>,
    #[serde(default)]
    pub data: Vec<DailyRecord>,
}

/// One chart category with conversion rates (percent) per stable id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPoint {
    pub label: String,
    pub values: IndexMap<String, f64>,
}

impl ProcessedPoint {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, stable_id: impl Into<String>, value: f64) -> Self {
        self.values.insert(stable_id.into(), value);
        self
    }

    /// Returns the value for a series when present and finite.
    #[must_use]
    pub fn value(&self, stable_id: &str) -> Option<f64> {
        self.values
            .get(stable_id)
            .copied()
            .filter(|value| value.is_finite())
    }
}
