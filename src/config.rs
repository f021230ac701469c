use crate::application::generate_picks::GenerateOptions;

/// Runtime settings read from `PICKBOARD_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub api_football_key: Option<String>,
    pub api_football_url: Option<String>,
    pub generate: GenerateOptions,
}

impl Config {
    pub fn from_env() -> Self {
        let mut generate = GenerateOptions::default();
        if let Some(v) = env_parse::<u8>("PICKBOARD_MIN_CONFIDENCE") {
            generate.min_confidence = v.min(100);
        }
        if let Some(v) = env_parse::<usize>("PICKBOARD_MAX_PICKS") {
            generate.limit = v;
        }

        Self {
            db_path: std::env::var("PICKBOARD_DB").unwrap_or_else(|_| "./pickboard.db".into()),
            api_football_key: std::env::var("PICKBOARD_API_FOOTBALL_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            api_football_url: std::env::var("PICKBOARD_API_FOOTBALL_URL").ok(),
            generate,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
