//! Fixtures shared by handler and dispatch tests.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use teloxide::{
    Bot,
    types::{Me, Message, Update},
};
use weather_core::{CurrentWeather, LookupError, WeatherProvider};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const CHAT_ID: i64 = 42;
pub const BOT_USERNAME: &str = "WeatherBot";

/// Records queried cities and answers with a fixed report, or with `status`.
#[derive(Debug, Default)]
pub struct Recording {
    pub cities: Mutex<Vec<String>>,
    pub status: Option<u16>,
}

impl Recording {
    pub fn queried(&self) -> Vec<String> {
        self.cities.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for Recording {
    async fn current(&self, city: &str) -> Result<CurrentWeather, LookupError> {
        self.cities.lock().unwrap().push(city.to_string());

        if let Some(code) = self.status {
            return Err(LookupError::Status {
                status: code.try_into().unwrap(),
                body: String::new(),
            });
        }

        Ok(CurrentWeather {
            location_name: "Odesa".into(),
            temperature_c: 18.25,
            feels_like_c: 17.9,
            humidity_pct: 64,
            pressure_hpa: 1017,
            wind_speed_mps: 5.1,
            utc_offset_secs: 10800,
            sunrise: 1_700_000_000,
            sunset: 1_700_030_000,
            condition: "Clear".into(),
            description: "чисте небо".into(),
        })
    }
}

fn message_json(text: &str) -> Value {
    json!({
        "message_id": 1,
        "date": 1_700_000_000,
        "chat": { "id": CHAT_ID, "type": "private", "first_name": "Test" },
        "from": {
            "id": CHAT_ID,
            "is_bot": false,
            "first_name": "Test",
            "is_premium": false,
            "added_to_attachment_menu": false
        },
        "text": text
    })
}

pub fn message(text: &str) -> Message {
    serde_json::from_value(message_json(text)).expect("valid message")
}

pub fn update(text: &str) -> Update {
    // `UpdateKind` only deserializes with borrowed keys, so parse from a string.
    serde_json::from_str(&json!({ "update_id": 1, "message": message_json(text) }).to_string())
        .expect("valid update")
}

pub fn me() -> Me {
    serde_json::from_value(json!({
        "id": 1,
        "is_bot": true,
        "first_name": "WeatherBot",
        "username": BOT_USERNAME,
        "is_premium": false,
        "added_to_attachment_menu": false,
        "can_join_groups": true,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
        "can_connect_to_business": false,
        "has_main_web_app": false
    }))
    .expect("valid me")
}

/// A bot whose Bot API is a mock server answering every `SendMessage`.
pub async fn bot_with_api() -> (Bot, MockServer) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botT/SendMessage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": true, "result": message_json("sent") })),
        )
        .mount(&server)
        .await;

    let bot = Bot::new("T").set_api_url(server.uri().parse().unwrap());
    (bot, server)
}

/// Texts of every message the bot sent, in order.
pub async fn sent_texts(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|req| serde_json::from_slice::<Value>(&req.body).ok())
        .filter_map(|body| body["text"].as_str().map(str::to_owned))
        .collect()
}
