mod health;
mod signal;

pub use health::health_router;
pub use signal::signal_router;
