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

use crate::model::fix_report::{FixMode, FixReport};

/// Last known values shown on the display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayState {
    last_speed: f64,
    last_heading: f64,
    last_mode: FixMode,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: FixMode) {
        self.last_mode = mode;
    }

    /// Copies over whichever optional values the report carries.
    /// Anything missing keeps its previous value.
    pub fn apply_fields(&mut self, report: &FixReport) {
        if let Some(speed) = report.get_speed() {
            self.last_speed = speed;
        }
        if let Some(heading) = report.get_heading() {
            self.last_heading = heading;
        }
        if let Some(lat) = report.get_latitude() {
            self.latitude = Some(lat);
        }
        if let Some(lon) = report.get_longitude() {
            self.longitude = Some(lon);
        }
    }

    pub fn get_last_speed(&self) -> f64 {
        self.last_speed
    }

    pub fn get_last_heading(&self) -> f64 {
        self.last_heading
    }

    pub fn get_last_mode(&self) -> FixMode {
        self.last_mode
    }

    pub fn get_latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn get_longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn has_fix(&self) -> bool {
        self.last_mode.has_fix()
    }

    pub fn has_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
