pub mod configuration;
pub use configuration::{AttackConfig, Config};

pub mod error_handling;
pub use error_handling::{ConfigError, FetchError, SessionError};

pub mod telemetry;
pub use telemetry::{LogEntry, MetricSample, TelemetryBuffer};

pub mod upstream;
pub use upstream::{FetchOutcome, UpstreamClient};

pub mod session_management;
pub use session_management::{Session, SessionController, SessionState};

pub mod presentation;
pub use presentation::{ConsoleSurface, RenderSurface};

pub mod web_interface;
pub use web_interface::WebServer;
