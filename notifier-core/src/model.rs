use serde::{Deserialize, Serialize};

/// Whole-degree Celsius temperatures for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Temperature {
    pub current: i32,
    pub min: i32,
    pub max: i32,
}

/// The merged reading rendered into the daily message.
///
/// `min <= current <= max` is not guaranteed; values are taken from upstream
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: Temperature,
    pub description: String,
    /// Percentage, 0-100.
    pub precipitation: u8,
    pub emoji: String,
}

/// Provider-specific condition identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionCode {
    Numeric(u32),
    Named(String),
}

/// Temperature and condition data from the primary provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryWeatherData {
    pub current_temp: i32,
    pub min_temp: i32,
    pub max_temp: i32,
    pub condition: String,
    pub condition_code: ConditionCode,
    pub emoji: String,
}

/// Precipitation probability from the secondary provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrecipitationData {
    pub precipitation: u8,
}

impl WeatherReading {
    /// Temperature and condition from `primary`, precipitation from `secondary`.
    pub fn merge(primary: PrimaryWeatherData, secondary: PrecipitationData) -> Self {
        Self {
            temperature: Temperature {
                current: primary.current_temp,
                min: primary.min_temp,
                max: primary.max_temp,
            },
            description: primary.condition,
            precipitation: secondary.precipitation,
            emoji: primary.emoji,
        }
    }
}

/// Rounds half away from zero, so 15.7 → 16, 20.4 → 20, 8.5 → 9.
pub fn round_celsius(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_matches_expected_cases() {
        assert_eq!(round_celsius(15.7), 16);
        assert_eq!(round_celsius(10.2), 10);
        assert_eq!(round_celsius(20.4), 20);
        assert_eq!(round_celsius(8.5), 9);
        assert_eq!(round_celsius(-0.4), 0);
    }

    #[test]
    fn merge_takes_each_field_from_its_source() {
        let primary = PrimaryWeatherData {
            current_temp: 15,
            min_temp: 10,
            max_temp: 20,
            condition: "晴れ".into(),
            condition_code: ConditionCode::Numeric(1000),
            emoji: "☀️".into(),
        };

        let reading = WeatherReading::merge(primary, PrecipitationData { precipitation: 30 });

        assert_eq!(
            reading.temperature,
            Temperature { current: 15, min: 10, max: 20 }
        );
        assert_eq!(reading.description, "晴れ");
        assert_eq!(reading.emoji, "☀️");
        assert_eq!(reading.precipitation, 30);
    }
}
