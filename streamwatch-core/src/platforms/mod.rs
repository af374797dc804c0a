// File: src/platforms/mod.rs

use async_trait::async_trait;
use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Error(String),
}

#[async_trait]
pub trait PlatformIntegration {
    async fn connect(&mut self) -> Result<(), Error>;
    async fn disconnect(&mut self) -> Result<(), Error>;
    async fn get_connection_status(&self) -> Result<ConnectionStatus, Error>;
}

pub mod twitch;
pub mod discord;
