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

use std::fmt;

/// Failures raised by the display pipeline.
#[derive(Debug)]
pub enum HudError {
    /// Bad startup configuration, e.g. an unknown speed unit
    Configuration(String),
    /// The daemon could not be reached
    Connection(std::io::Error),
    /// Socket error while watching
    Stream(std::io::Error),
    /// The daemon closed the stream
    StreamHangup,
    /// A report could not be decoded
    Parse(String),
    /// Day/night asked for before any fix supplied coordinates
    MissingLocation,
}

impl fmt::Display for HudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HudError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            HudError::Connection(err) => write!(f, "Unable to connect to gpsd: {}", err),
            HudError::Stream(err) => write!(f, "gpsd stream error: {}", err),
            HudError::StreamHangup => write!(f, "gpsd closed the stream"),
            HudError::Parse(msg) => write!(f, "Invalid gpsd report: {}", msg),
            HudError::MissingLocation => write!(f, "No location has been reported yet"),
        }
    }
}

impl std::error::Error for HudError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HudError::Connection(err) => Some(err),
            HudError::Stream(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HudError {
    fn from(err: serde_json::Error) -> Self {
        HudError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HudError>;
