use taskpage_core::api::{AlertsConfig, AppConfig, ServerConfig};

/// Config pointed at a test server, with alert delays short enough for
/// wall-clock integration runs.
pub fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            base_url: base_url.to_string(),
            timeout_ms: 2_000,
        },
        alerts: AlertsConfig {
            display_ms: 30,
            fade_ms: 10,
        },
        ..AppConfig::default()
    }
}

pub fn snapshot_json(csrf_token: Option<&str>) -> String {
    let token = match csrf_token {
        Some(t) => format!(r#""csrf_token": "{t}","#),
        None => String::new(),
    };
    format!(
        r#"{{
            {token}
            "tasks": [
                {{"task_id": "1", "completed": false}},
                {{"task_id": "2", "completed": true}}
            ],
            "alerts": [{{}}]
        }}"#
    )
}
