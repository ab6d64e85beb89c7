/*
 * Copyright (c) 2003-2025. Trevor Campbell and others.
 *
 * This file is part of GPS HUD.
 *
 * GPS HUD is free software; you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation; either version 2 of the License, or
 * (at your option) any later version.
 *
 * GPS HUD is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with GPS HUD; if not, write to the Free Software
 * Foundation, Inc., 59 Temple Place, Suite 330, Boston, MA  02111-1307  USA
 *
 * Contributors:
 *      Trevor Campbell
 *
 */

use std::time::Duration;

use async_std::future;
use async_std::io::{BufReader, Lines};
use async_std::net::TcpStream;
use async_std::prelude::*;
use async_std::task;
use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{HudError, Result};
use crate::model::fix_report::FixReport;

pub const GPSD_PORT: u16 = 2947;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Watching,
    Error,
}

/// What woke the event loop.
#[derive(Debug)]
pub enum StreamEvent {
    Readable(FixReport),
    /// Nothing arrived within the idle period
    Idle,
    /// The session is over, by error or by the daemon closing it
    Hangup(HudError),
}

#[derive(Serialize)]
struct WatchRequest<'a> {
    enable: bool,
    json: bool,
    scaled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<&'a str>,
}

fn watch_command(device: Option<&str>) -> Result<String> {
    let request = WatchRequest {
        enable: true,
        json: true,
        scaled: true,
        device,
    };
    Ok(format!("?WATCH={};\n", serde_json::to_string(&request)?))
}

/// A watch session with gpsd.
pub struct FixStreamClient {
    host: String,
    port: u16,
    device: Option<String>,
    state: ConnectionState,
    reports: Option<Lines<BufReader<TcpStream>>>,
}

impl FixStreamClient {
    pub fn new(host: &str, port: u16, device: Option<String>) -> Self {
        FixStreamClient {
            host: host.to_string(),
            port,
            device,
            state: ConnectionState::Disconnected,
            reports: None,
        }
    }

    pub fn get_state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.reports.is_some()
    }

    pub async fn open(&mut self) -> Result<()> {
        self.state = ConnectionState::Connecting;
        match self.watch().await {
            Ok(reports) => {
                info!("Watching gpsd at {}:{}", self.host, self.port);
                self.reports = Some(reports);
                self.state = ConnectionState::Watching;
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                self.state = ConnectionState::Error;
                Err(e)
            }
        }
    }

    async fn watch(&self) -> Result<Lines<BufReader<TcpStream>>> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(HudError::Connection)?;
        let command = watch_command(self.device.as_deref())?;
        stream
            .write_all(command.as_bytes())
            .await
            .map_err(HudError::Connection)?;
        Ok(BufReader::new(stream).lines())
    }

    /// Drops the session and watches again with the same parameters.
    pub async fn reconnect(&mut self) -> Result<()> {
        info!("Renewing gpsd watch");
        self.close();
        self.open().await
    }

    pub fn close(&mut self) {
        self.reports = None;
        self.state = ConnectionState::Disconnected;
    }

    /// Waits for the next report. Any failure ends the session.
    pub async fn next_report(&mut self) -> Result<FixReport> {
        let result = self.read_report().await;
        if let Err(e) = &result {
            warn!("{}", e);
            self.reports = None;
            self.state = ConnectionState::Error;
        }
        result
    }

    async fn read_report(&mut self) -> Result<FixReport> {
        let reports = self.reports.as_mut().ok_or(HudError::StreamHangup)?;
        loop {
            match reports.next().await {
                Some(Ok(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    debug!("gpsd: {}", line);
                    return FixReport::parse(&line);
                }
                Some(Err(e)) => return Err(HudError::Stream(e)),
                None => return Err(HudError::StreamHangup),
            }
        }
    }

    /// Waits at most `idle` for the next report. Without a session this is
    /// only a timer.
    pub async fn next_event(&mut self, idle: Duration) -> StreamEvent {
        if self.reports.is_none() {
            task::sleep(idle).await;
            return StreamEvent::Idle;
        }
        match future::timeout(idle, self.next_report()).await {
            Ok(Ok(report)) => StreamEvent::Readable(report),
            Ok(Err(e)) => StreamEvent::Hangup(e),
            Err(_) => StreamEvent::Idle,
        }
    }
}
