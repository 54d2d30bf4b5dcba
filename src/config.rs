// src/config.rs
use crate::application::usecase::ExchangeAdapter;
use crate::domain::errors::{AdapterError, AdapterResult};
use crate::domain::model::Pair;
use crate::domain::repository::VenueClient;
use crate::infrastructure::retry::RetryPolicy;
use dotenv::dotenv;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Venue API credentials
    pub venue: VenueConfig,

    /// Trading pair and fee configuration
    pub trading: TradingConfig,

    /// Trade-history retry configuration
    pub retry: RetryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Venue API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// API key
    pub api_key: String,

    /// API secret
    pub api_secret: String,
}

/// Trading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Quote currency (e.g. "BTC")
    pub currency: String,

    /// Base asset (e.g. "ETH")
    pub asset: String,

    /// Maker fee for the account tier, in percent (0.25 = 0.25%)
    pub maker_fee_percent: Decimal,
}

impl TradingConfig {
    pub fn pair(&self) -> Pair {
        Pair::new(&self.currency, &self.asset)
    }

    /// Maker fee as a fraction of notional.
    pub fn maker_fee(&self) -> Decimal {
        self.maker_fee_percent / dec!(100)
    }
}

/// Trade-history retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Delay before the first re-invocation, in seconds
    pub delay_secs: u64,

    /// Per-failure delay multiplier (1 = fixed interval)
    pub backoff_multiplier: u32,

    /// Ceiling the backoff grows toward, in seconds
    pub max_delay_secs: u64,

    /// Total invocation cap; None retries until the fetch succeeds
    pub max_attempts: Option<u32>,
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        let mut policy = RetryPolicy::fixed(Duration::from_secs(self.delay_secs))
            .with_multiplier(self.backoff_multiplier)
            .with_max_delay(Duration::from_secs(self.max_delay_secs));

        if let Some(max_attempts) = self.max_attempts {
            policy = policy.with_max_attempts(max_attempts);
        }

        policy
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file
    pub to_file: bool,

    /// Log file path
    pub file_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AdapterResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let venue_config = VenueConfig {
            api_key: env::var("API_KEY").map_err(|_| {
                AdapterError::Config("Missing API_KEY environment variable".to_string())
            })?,
            api_secret: env::var("API_SECRET").map_err(|_| {
                AdapterError::Config("Missing API_SECRET environment variable".to_string())
            })?,
        };

        let trading_config = TradingConfig {
            currency: env::var("CURRENCY").unwrap_or_else(|_| "BTC".to_string()),
            asset: env::var("ASSET").unwrap_or_else(|_| "ETH".to_string()),
            maker_fee_percent: env::var("MAKER_FEE_PERCENT")
                .unwrap_or_else(|_| "0.25".to_string())
                .parse()
                .unwrap_or(dec!(0.25)),
        };

        let retry_config = RetryConfig {
            delay_secs: env::var("RETRY_DELAY_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            backoff_multiplier: env::var("RETRY_BACKOFF_MULTIPLIER")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),
            max_delay_secs: env::var("RETRY_MAX_DELAY_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            max_attempts: env::var("RETRY_MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()),
        };

        let logging_config = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            to_file: env::var("LOG_TO_FILE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            file_path: env::var("LOG_FILE_PATH").ok(),
        };

        Ok(Config {
            venue: venue_config,
            trading: trading_config,
            retry: retry_config,
            logging: logging_config,
        })
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AdapterResult<Self> {
        let mut file = File::open(path)
            .map_err(|e| AdapterError::Config(format!("Failed to open config file: {}", e)))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AdapterError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| AdapterError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> AdapterResult<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AdapterError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| AdapterError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Build an adapter over an already-constructed venue client.
    ///
    /// The client is passed in, never taken from a process-wide singleton;
    /// the credentials in `self.venue` are for whoever constructs it.
    pub fn build_adapter(&self, client: Arc<dyn VenueClient>) -> ExchangeAdapter {
        ExchangeAdapter::new(
            client,
            self.trading.pair(),
            self.trading.maker_fee(),
            self.retry.policy(),
        )
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AdapterResult<()> {
        let mut builder = env_logger::Builder::new();

        // Set log level
        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        // Configure output
        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path)
                    .map_err(|e| AdapterError::Config(format!("Failed to create log file: {}", e)))?;

                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        // Initialize the logger
        builder.init();

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            venue: VenueConfig {
                api_key: "".to_string(),
                api_secret: "".to_string(),
            },
            trading: TradingConfig {
                currency: "BTC".to_string(),
                asset: "ETH".to_string(),
                maker_fee_percent: dec!(0.25),
            },
            retry: RetryConfig {
                delay_secs: 10,
                backoff_multiplier: 1,
                max_delay_secs: 10,
                max_attempts: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                to_file: false,
                file_path: None,
            },
        }
    }
}
