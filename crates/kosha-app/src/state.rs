use std::env;

use kosha_analytics::{Origin, Tracker};
use kosha_config::Config;
use kosha_core::Kosha;

pub struct AppState {
    pub config: Config,
    pub kosha: Kosha,
    pub tracker: Tracker,
    /// Who is asking; a terminal session is a single private user
    pub origin: Origin,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let kosha = kosha_lang_sanskrit::kosha(&config.upstream)?;
        let tracker = Tracker::from_config(&config.analytics);

        Ok(Self::with_parts(config, kosha, tracker))
    }

    pub fn with_parts(config: Config, kosha: Kosha, tracker: Tracker) -> Self {
        let origin = Origin {
            user_id: Some(0),
            user_name: env::var("USER").ok(),
            chat_type: Some("cli".to_string()),
            ..Origin::default()
        };

        Self {
            config,
            kosha,
            tracker,
            origin,
        }
    }
}
