use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    // falls back to the in-memory store when unset
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,

    pub rate_limit_per_sec: Option<u64>,
    pub body_limit_bytes: Option<usize>,
}

fn default_app_env() -> String {
    "development".to_string()
}
