//! Configuration Management

mod settings;

pub use settings::{
    CorsSettings, DatabaseSettings, RedisSettings, ServerSettings, SessionSettings, Settings,
    UploadSettings,
};
