pub mod authorization;
pub mod connection_registry;
pub mod notification_service;
pub mod token_service;
