use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label used whenever a code cannot be resolved
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Face++ skinanalyze response. Every field is optional and decoded leniently:
/// a field with an unexpected shape is dropped instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_used: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub result: Option<SkinResult>,
}

impl AnalysisResponse {
    /// Decode from any JSON value. Never fails; a non-object value yields an empty response.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            log::warn!("⚠️ Analysis response is not an object, treating as empty");
            return Self::default();
        }

        match serde_json::from_value(value) {
            Ok(response) => response,
            Err(e) => {
                log::warn!("⚠️ Analysis response could not be decoded, treating as empty: {}", e);
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinResult {
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinTypeScore>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub acne: Option<AttributeScore>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub dark_circle: Option<AttributeScore>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub eye_pouch: Option<AttributeScore>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub forehead_wrinkle: Option<AttributeScore>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub crows_feet: Option<AttributeScore>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub glabella_wrinkle: Option<AttributeScore>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub nasolabial_fold: Option<AttributeScore>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub skin_spot: Option<AttributeScore>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub blackhead: Option<AttributeScore>,
}

/// A single graded attribute (`{"value": 0..3, "confidence": ...}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeScore {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl AttributeScore {
    pub fn severity(&self) -> Option<Severity> {
        self.value.and_then(Severity::from_code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinTypeScore {
    #[serde(default, deserialize_with = "lenient")]
    pub skin_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl SkinTypeScore {
    pub fn skin_type(&self) -> Option<SkinType> {
        self.skin_type.and_then(SkinType::from_code)
    }
}

/// Presence grade reported for acne, dark circles, wrinkles, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Absent,
    Slight,
    Moderate,
    Severe,
}

impl Severity {
    #[cfg(test)]
    pub const ALL: [Severity; 4] = [
        Severity::Absent,
        Severity::Slight,
        Severity::Moderate,
        Severity::Severe,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Severity::Absent),
            1 => Some(Severity::Slight),
            2 => Some(Severity::Moderate),
            3 => Some(Severity::Severe),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn code(self) -> i64 {
        match self {
            Severity::Absent => 0,
            Severity::Slight => 1,
            Severity::Moderate => 2,
            Severity::Severe => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Absent => "None",
            Severity::Slight => "Slight",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinType {
    Oily,
    Dry,
    Normal,
    Combination,
}

impl SkinType {
    #[cfg(test)]
    pub const ALL: [SkinType; 4] = [
        SkinType::Oily,
        SkinType::Dry,
        SkinType::Normal,
        SkinType::Combination,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(SkinType::Oily),
            1 => Some(SkinType::Dry),
            2 => Some(SkinType::Normal),
            3 => Some(SkinType::Combination),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SkinType::Oily => "Oily",
            SkinType::Dry => "Dry",
            SkinType::Normal => "Normal",
            SkinType::Combination => "Combination",
        }
    }
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decode a field as `T`, or `None` if it is null or has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Like `lenient`, but only a JSON object may fill a struct; serde would
/// otherwise accept an array and assign its items to fields by position.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}
