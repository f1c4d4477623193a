use dotenvy::dotenv;
use std::env;
use teloxide::types::ChatId;
use tracing::{error, warn};
use url::Url;

/// Fallback payment link, used both as the button URL and as the QR image
/// source when PAYMENT_URL is not set.
pub const DEFAULT_PAYMENT_URL: &str =
    "https://qr.finik.kg/c1b526b5-040b-4eca-9017-6df94e6f8d71?type=t";

/// Process-wide configuration, read once at startup and never mutated.
///
/// Missing required variables do not abort startup: the bot keeps serving
/// requests in a degraded state where autoposting is disabled.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub token: Option<String>,
    pub chat_id: Option<ChatId>,
    pub cron_secret: Option<String>,
    pub payment_url: Url,
    pub support_url: Option<Url>,
    pub api_url: Option<Url>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        if cfg!(not(test)) {
            let _ = dotenv();
        }

        let token = read_non_empty("BOT_TOKEN");

        let chat_id = read_non_empty("CHAT_ID").and_then(|s| match s.parse::<i64>() {
            Ok(id) => Some(ChatId(id)),
            Err(_) => {
                warn!("invalid CHAT_ID (expected integer): {s}");
                None
            }
        });

        let cron_secret = read_non_empty("CRON_SECRET");

        let payment_url = match read_non_empty("PAYMENT_URL") {
            Some(s) => match Url::parse(&s) {
                Ok(url) => url,
                Err(_) => {
                    warn!("invalid PAYMENT_URL, using default: {s}");
                    Url::parse(DEFAULT_PAYMENT_URL).unwrap()
                }
            },
            None => Url::parse(DEFAULT_PAYMENT_URL).unwrap(),
        };

        let support_url = resolve_support_url();

        let api_url = read_non_empty("TELEGRAM_API_URL").and_then(|s| match Url::parse(&s) {
            Ok(url) => Some(url),
            Err(_) => {
                warn!("invalid TELEGRAM_API_URL, using the default Bot API server: {s}");
                None
            }
        });

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080u16);

        let mut missing = Vec::new();
        if token.is_none() {
            missing.push("BOT_TOKEN");
        }
        if chat_id.is_none() {
            missing.push("CHAT_ID");
        }
        if cron_secret.is_none() {
            missing.push("CRON_SECRET");
        }
        if !missing.is_empty() {
            error!(
                "missing required env vars: {} (serving in degraded mode, autoposting disabled)",
                missing.join(", ")
            );
        }

        AppConfig {
            token,
            chat_id,
            cron_secret,
            payment_url,
            support_url,
            api_url,
            port,
        }
    }
}

/// The support contact comes in two mutually exclusive variants: a full
/// SUPPORT_URL, or a SUPPORT_USERNAME that needs a t.me link built around it.
/// Both normalize to a URL here so nothing downstream branches on the variant,
/// and a button is only ever rendered from a well-formed link.
fn resolve_support_url() -> Option<Url> {
    if let Some(s) = read_non_empty("SUPPORT_URL") {
        return match Url::parse(&s) {
            Ok(url) => Some(url),
            Err(_) => {
                warn!("invalid SUPPORT_URL, support button disabled: {s}");
                None
            }
        };
    }

    let username = read_non_empty("SUPPORT_USERNAME")?;
    let username = username.trim_start_matches('@');
    if username.is_empty() {
        warn!("empty SUPPORT_USERNAME, support button disabled");
        return None;
    }
    match Url::parse(&format!("https://t.me/{username}")) {
        Ok(url) => Some(url),
        Err(_) => {
            warn!("SUPPORT_USERNAME does not form a valid link, support button disabled");
            None
        }
    }
}

fn read_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}
