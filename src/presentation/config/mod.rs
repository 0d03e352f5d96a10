mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CorsSettings, LoggingSettings, PollingSettings, RateLimitSettings, ServerSettings, Settings,
    UploadSettings, VendorSettings,
};
