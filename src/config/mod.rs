//! Configuración de la aplicación

pub mod delivery;
pub mod environment;

pub use delivery::DeliveryConfig;
pub use environment::EnvironmentConfig;
