//! Static condition-code tables.

/// Glyph used when a condition code is not in any table.
pub const DEFAULT_EMOJI: &str = "🌤️";

/// WeatherAPI.com condition code → display glyph.
pub fn weatherapi_emoji(code: u32) -> Option<&'static str> {
    let emoji = match code {
        1000 => "☀️",
        1003 => "⛅",
        1006 | 1009 => "☁️",
        1030 | 1135 | 1147 => "🌫️",
        1063 | 1150 | 1153 | 1180 | 1240 => "🌦️",
        1072 | 1168 | 1171 | 1183 | 1186 | 1189 | 1192 | 1195 | 1198 | 1201 | 1243 | 1246 => {
            "🌧️"
        }
        1087 | 1273 | 1276 | 1279 | 1282 => "⛈️",
        1066 | 1069 | 1204 | 1207 | 1210 | 1213 | 1249 | 1252 | 1255 | 1261 => "🌨️",
        1114 | 1117 | 1216 | 1219 | 1222 | 1225 | 1237 | 1258 | 1264 => "❄️",
        _ => return None,
    };
    Some(emoji)
}

/// WeatherAPI.com condition code → Japanese description.
pub fn weatherapi_description_ja(code: u32) -> Option<&'static str> {
    let text = match code {
        1000 => "晴れ",
        1003 => "晴れ時々曇り",
        1006 => "曇り",
        1009 => "どんより曇り",
        1030 => "霧",
        1063 => "雨の可能性",
        1066 => "雪の可能性",
        1069 => "みぞれの可能性",
        1072 => "着氷性の霧雨の可能性",
        1087 => "雷雨の可能性",
        1114 => "地吹雪",
        1117 => "吹雪",
        1135 => "濃霧",
        1147 => "着氷性の霧",
        1150 => "所により弱い霧雨",
        1153 => "弱い霧雨",
        1168 => "着氷性の霧雨",
        1171 => "強い着氷性の霧雨",
        1180 => "所により小雨",
        1183 => "小雨",
        1186 => "時々雨",
        1189 => "雨",
        1192 => "時々強い雨",
        1195 => "強い雨",
        1198 => "弱い着氷性の雨",
        1201 => "強い着氷性の雨",
        1204 => "弱いみぞれ",
        1207 => "強いみぞれ",
        1210 => "小雪",
        1213 => "弱い雪",
        1216 => "所により雪",
        1219 => "雪",
        1222 => "所により大雪",
        1225 => "大雪",
        1237 => "凍雨",
        1240 => "弱いにわか雨",
        1243 => "強いにわか雨",
        1246 => "激しいにわか雨",
        1249 => "弱いみぞれのにわか雨",
        1252 => "強いみぞれのにわか雨",
        1255 => "弱いにわか雪",
        1258 => "強いにわか雪",
        1261 => "弱い凍雨",
        1264 => "強い凍雨",
        1273 => "所により雷を伴う小雨",
        1276 => "雷を伴う強い雨",
        1279 => "所により雷を伴う小雪",
        1282 => "雷を伴う強い雪",
        _ => return None,
    };
    Some(text)
}

/// OpenWeather `weather[].main` group → display glyph.
pub fn openweather_emoji(main: &str) -> Option<&'static str> {
    let emoji = match main {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Drizzle" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" => "❄️",
        "Mist" | "Fog" => "🌫️",
        _ => return None,
    };
    Some(emoji)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weatherapi_pinned_codes() {
        let cases = [
            (1000, "晴れ", "☀️"),
            (1003, "晴れ時々曇り", "⛅"),
            (1006, "曇り", "☁️"),
            (1030, "霧", "🌫️"),
            (1063, "雨の可能性", "🌦️"),
            (1183, "小雨", "🌧️"),
            (1195, "強い雨", "🌧️"),
            (1087, "雷雨の可能性", "⛈️"),
            (1210, "小雪", "🌨️"),
            (1225, "大雪", "❄️"),
        ];

        for (code, description, emoji) in cases {
            assert_eq!(weatherapi_description_ja(code), Some(description), "code {code}");
            assert_eq!(weatherapi_emoji(code), Some(emoji), "code {code}");
        }
    }

    #[test]
    fn every_described_code_has_a_glyph() {
        for code in 1000..=1282 {
            if weatherapi_description_ja(code).is_some() {
                assert!(weatherapi_emoji(code).is_some(), "code {code} lacks emoji");
            }
        }
    }

    #[test]
    fn unknown_codes_are_absent() {
        assert_eq!(weatherapi_emoji(9999), None);
        assert_eq!(weatherapi_description_ja(9999), None);
        assert_eq!(openweather_emoji("Tornado"), None);
    }

    #[test]
    fn openweather_groups() {
        assert_eq!(openweather_emoji("Clear"), Some("☀️"));
        assert_eq!(openweather_emoji("Fog"), Some("🌫️"));
    }
}
