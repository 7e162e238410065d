use crate::model::WeatherReading;

/// Place name shown in the message heading.
pub const LOCATION_NAME: &str = "川崎市";

/// Render the daily message. Section markers are matched verbatim downstream,
/// so the layout must not change.
pub fn format_message(reading: &WeatherReading) -> String {
    let WeatherReading {
        temperature,
        description,
        precipitation,
        emoji,
    } = reading;

    format!(
        "{emoji} {LOCATION_NAME}の天気

今日の天気: {description}

🌡️ 気温
・現在: {current}℃
・最低: {min}℃
・最高: {max}℃

☔ 降水確率: {precipitation}%

良い一日をお過ごしください！",
        current = temperature.current,
        min = temperature.min,
        max = temperature.max,
    )
}
