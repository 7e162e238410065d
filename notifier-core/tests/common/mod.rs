#![allow(dead_code)]

use std::time::Duration;

use notifier_core::RetryConfig;
use serde_json::{Value, json};

/// Same budget as production, with millisecond delays.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        ..RetryConfig::default()
    }
}

pub fn weatherapi_body(current: f64, code: u32, text: &str, hours: &[(&str, f64)]) -> Value {
    let hours: Vec<Value> = hours
        .iter()
        .map(|(time, temp)| {
            json!({
                "time": time,
                "temp_c": temp,
                "chance_of_rain": 0,
                "condition": { "text": text, "code": code }
            })
        })
        .collect();

    json!({
        "location": {
            "name": "Kawasaki",
            "region": "Kanagawa",
            "country": "Japan",
            "lat": 35.53,
            "lon": 139.7,
            "localtime": "2026-01-08 12:00"
        },
        "current": { "temp_c": current, "condition": { "text": text, "code": code } },
        "forecast": {
            "forecastday": [{
                "date": "2026-01-08",
                "day": { "maxtemp_c": 12.0, "mintemp_c": 8.0, "condition": { "text": text, "code": code } },
                "hour": hours
            }]
        }
    })
}

pub fn jma_body(pops: &[&str]) -> Value {
    json!([
        {
            "publishingOffice": "横浜地方気象台",
            "reportDatetime": "2026-01-08T11:00:00+09:00",
            "timeSeries": [
                {
                    "timeDefines": ["2026-01-08T00:00:00+09:00"],
                    "areas": [{ "area": { "name": "東部", "code": "140010" }, "weathers": ["晴れ"], "weatherCodes": ["100"] }]
                },
                {
                    "timeDefines": [
                        "2026-01-08T00:00:00+09:00",
                        "2026-01-08T06:00:00+09:00",
                        "2026-01-08T12:00:00+09:00",
                        "2026-01-08T18:00:00+09:00"
                    ],
                    "areas": [
                        { "area": { "name": "西部", "code": "140020" }, "pops": ["90", "90", "90", "90"] },
                        { "area": { "name": "東部", "code": "140010" }, "pops": pops }
                    ]
                }
            ]
        },
        { "publishingOffice": "横浜地方気象台", "timeSeries": [] }
    ])
}
