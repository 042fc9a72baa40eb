/// Server configuration, read from the environment (a `.env` file is
/// loaded first when present).
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub polygon_api_key: Option<String>,
    pub alpha_vantage_api_key: Option<String>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            listen_addr: env_or("CARTERA_LISTEN_ADDR", "127.0.0.1:8720"),
            db_path: env_or("CARTERA_DB_PATH", "cartera.db"),
            polygon_api_key: env_opt("POLYGON_API_KEY"),
            alpha_vantage_api_key: env_opt("ALPHA_VANTAGE_API_KEY"),
        }
    }
}
