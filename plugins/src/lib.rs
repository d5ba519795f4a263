pub mod capability;
pub mod factory;
pub mod services;

pub use services::PluginServicesFactory;
