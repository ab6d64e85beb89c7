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

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{HudError, Result};

/// gpsd fix quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixMode {
    /// Mode not yet seen
    #[default]
    Unknown,
    NoFix,
    Fix2D,
    Fix3D,
}

impl FixMode {
    pub fn from_code(code: u8) -> Option<FixMode> {
        match code {
            0 => Some(FixMode::Unknown),
            1 => Some(FixMode::NoFix),
            2 => Some(FixMode::Fix2D),
            3 => Some(FixMode::Fix3D),
            _ => None,
        }
    }

    pub fn has_fix(&self) -> bool {
        matches!(self, FixMode::Fix2D | FixMode::Fix3D)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportClass {
    /// A TPV (time-position-velocity) report
    Position,
    Other(String),
}

impl ReportClass {
    pub fn name(&self) -> &str {
        match self {
            ReportClass::Position => "TPV",
            ReportClass::Other(name) => name,
        }
    }
}

// Wire form of any report in a watch session
#[derive(Deserialize)]
struct RawReport {
    class: String,
    mode: Option<u8>,
    speed: Option<f64>,
    track: Option<f64>,
    lat: Option<f64>,
    lon: Option<f64>,
    time: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixReport {
    class: ReportClass,
    mode: FixMode,
    speed: Option<f64>,
    heading: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    utc: Option<String>,
}

impl FixReport {
    pub fn parse(line: &str) -> Result<FixReport> {
        let raw: RawReport = serde_json::from_str(line)?;

        if raw.class != "TPV" {
            return Ok(FixReport {
                class: ReportClass::Other(raw.class),
                mode: FixMode::default(),
                speed: None,
                heading: None,
                latitude: None,
                longitude: None,
                utc: None,
            });
        }

        let code = raw
            .mode
            .ok_or_else(|| HudError::Parse("TPV report without a mode".to_string()))?;
        let mode = FixMode::from_code(code)
            .ok_or_else(|| HudError::Parse(format!("Unknown fix mode {}", code)))?;

        Ok(FixReport {
            class: ReportClass::Position,
            mode,
            speed: raw.speed,
            heading: raw.track,
            latitude: raw.lat,
            longitude: raw.lon,
            utc: raw.time,
        })
    }

    pub fn is_position(&self) -> bool {
        self.class == ReportClass::Position
    }

    /// A position report that carries a 2D or 3D fix.
    pub fn has_fix(&self) -> bool {
        self.is_position() && self.mode.has_fix()
    }

    pub fn get_class(&self) -> &ReportClass {
        &self.class
    }

    pub fn get_mode(&self) -> FixMode {
        self.mode
    }

    pub fn get_speed(&self) -> Option<f64> {
        self.speed
    }

    pub fn get_heading(&self) -> Option<f64> {
        self.heading
    }

    pub fn get_latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn get_longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn get_utc(&self) -> Option<&str> {
        self.utc.as_deref()
    }
}

impl FromStr for FixReport {
    type Err = HudError;

    fn from_str(s: &str) -> Result<Self> {
        FixReport::parse(s)
    }
}
