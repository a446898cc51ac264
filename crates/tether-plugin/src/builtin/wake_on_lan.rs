// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wake-on-LAN capability.
//!
//! Sends a magic packet (6 x 0xFF followed by the target MAC repeated 16
//! times) over UDP. The `[config]` table can override `broadcast_addr` and
//! `port`, which also lets tests target loopback instead of the broadcast
//! address.

use async_trait::async_trait;
use tether_core::{Capability, CommandCatalog, TetherError};
use tokio::net::UdpSocket;
use tracing::info;

use crate::factory::CapabilityFactory;

const DEFAULT_BROADCAST_ADDR: &str = "255.255.255.255";
const DEFAULT_PORT: u16 = 9;

pub struct WakeOnLanFactory;

impl CapabilityFactory for WakeOnLanFactory {
    fn kind(&self) -> &str {
        "wake_on_lan"
    }

    fn create(&self) -> Box<dyn Capability> {
        Box::new(WakeOnLanCapability {
            broadcast_addr: DEFAULT_BROADCAST_ADDR.to_string(),
            port: DEFAULT_PORT,
        })
    }
}

pub struct WakeOnLanCapability {
    broadcast_addr: String,
    port: u16,
}

/// Parses a MAC address in `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff` form.
fn parse_mac(mac: &str) -> Result<[u8; 6], TetherError> {
    let parts: Vec<&str> = mac.split([':', '-']).collect();
    if parts.len() != 6 {
        return Err(TetherError::Plugin {
            message: format!("invalid MAC address '{mac}': expected 6 octets"),
            source: None,
        });
    }
    let mut bytes = [0u8; 6];
    for (i, part) in parts.iter().enumerate() {
        bytes[i] = u8::from_str_radix(part, 16).map_err(|_| TetherError::Plugin {
            message: format!("invalid MAC address '{mac}': bad octet '{part}'"),
            source: None,
        })?;
    }
    Ok(bytes)
}

/// Builds the 102-byte magic packet for the given MAC.
fn magic_packet(mac: [u8; 6]) -> [u8; 102] {
    let mut packet = [0xffu8; 102];
    for chunk in packet[6..].chunks_exact_mut(6) {
        chunk.copy_from_slice(&mac);
    }
    packet
}

#[async_trait]
impl Capability for WakeOnLanCapability {
    async fn initialize(&mut self, config: &serde_json::Value) -> Result<(), TetherError> {
        if let Some(addr) = config.get("broadcast_addr") {
            self.broadcast_addr = addr
                .as_str()
                .ok_or_else(|| {
                    TetherError::Config("'broadcast_addr' must be a string".to_string())
                })?
                .to_string();
        }
        if let Some(port) = config.get("port") {
            let port = port.as_u64().ok_or_else(|| {
                TetherError::Config("'port' must be an integer".to_string())
            })?;
            self.port = u16::try_from(port)
                .map_err(|_| TetherError::Config(format!("'port' out of range: {port}")))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Wake-on-LAN"
    }

    fn description(&self) -> &str {
        "Wakes machines on the local network via magic packets"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn commands(&self) -> CommandCatalog {
        let mut commands = CommandCatalog::new();
        commands.insert(
            "wake".to_string(),
            "Send a magic packet to a MAC address (args: mac)".to_string(),
        );
        commands
    }

    async fn execute(
        &self,
        command: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError> {
        match command {
            "wake" => {
                let mac_str = args
                    .get("mac")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| TetherError::Plugin {
                        message: "missing required 'mac' argument".to_string(),
                        source: None,
                    })?;
                let mac = parse_mac(mac_str)?;
                let packet = magic_packet(mac);

                let socket = UdpSocket::bind("0.0.0.0:0")
                    .await
                    .map_err(|e| TetherError::io("binding wake-on-lan socket", e))?;
                socket
                    .set_broadcast(true)
                    .map_err(|e| TetherError::io("enabling broadcast", e))?;
                let target = format!("{}:{}", self.broadcast_addr, self.port);
                socket
                    .send_to(&packet, &target)
                    .await
                    .map_err(|e| TetherError::io(format!("sending magic packet to {target}"), e))?;

                info!(mac = %mac_str, target = %target, "sent magic packet");
                Ok(serde_json::json!({
                    "mac": mac_str,
                    "target": target,
                    "bytes_sent": packet.len(),
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
