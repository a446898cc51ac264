// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal demonstration capability.
//!
//! Greets whoever is named in the command arguments. The `[config]` table
//! may set a `greeting` prefix; the default is "Hello".

use async_trait::async_trait;
use tether_core::{Capability, CommandCatalog, TetherError};

use crate::factory::CapabilityFactory;

pub struct HelloFactory;

impl CapabilityFactory for HelloFactory {
    fn kind(&self) -> &str {
        "hello"
    }

    fn create(&self) -> Box<dyn Capability> {
        Box::new(HelloCapability {
            greeting: "Hello".to_string(),
        })
    }
}

pub struct HelloCapability {
    greeting: String,
}

#[async_trait]
impl Capability for HelloCapability {
    async fn initialize(&mut self, config: &serde_json::Value) -> Result<(), TetherError> {
        if let Some(greeting) = config.get("greeting") {
            let greeting = greeting.as_str().ok_or_else(|| {
                TetherError::Config("'greeting' must be a string".to_string())
            })?;
            if greeting.is_empty() {
                return Err(TetherError::Config(
                    "'greeting' must not be empty".to_string(),
                ));
            }
            self.greeting = greeting.to_string();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Hello World"
    }

    fn description(&self) -> &str {
        "Greets people by name"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn commands(&self) -> CommandCatalog {
        let mut commands = CommandCatalog::new();
        commands.insert(
            "greet".to_string(),
            "Greet someone by name (args: name)".to_string(),
        );
        commands
    }

    async fn execute(
        &self,
        command: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError> {
        match command {
            "greet" => {
                let name = args
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("world");
                Ok(serde_json::json!({
                    "message": format!("{}, {name}!", self.greeting)
                }))
            }
            other => Err(TetherError::UnknownCommand {
                plugin: self.name().to_string(),
                command: other.to_string(),
            }),
        }
    }

    async fn cleanup(&self) {}
}
