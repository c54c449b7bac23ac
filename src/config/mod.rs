mod app_config;

pub use app_config::{
    parse_bool_flag, AppConfig, AuthConfig, LogFormat, LoggingConfig, ServerConfig,
};
