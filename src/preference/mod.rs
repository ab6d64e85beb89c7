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
use std::sync::RwLock;

use preferences::{AppInfo, Preferences, PreferencesMap};

use crate::error::Result;
use crate::util::gpsd_link::GPSD_PORT;
use crate::util::speed_format::SpeedUnit;

const PREFS_PATH: &str = "hud";
const APP_INFO: AppInfo = AppInfo {
    name: "gps-hud",
    author: "shartrec.com",
};

// Preference constants
pub const GPSD_HOST: &str = "Gpsd.host";
pub const GPSD_PORT_KEY: &str = "Gpsd.port";
pub const GPSD_DEVICE: &str = "Gpsd.device";
pub const SPEED_UNIT: &str = "Display.speedUnit";
pub const DEBUG_LEVEL: &str = "Debug.level";

const DEFAULT_HOST: &str = "localhost";

pub struct PreferenceManager {
    preferences: RwLock<PreferencesMap>,
    path: &'static str,
}

impl PreferenceManager {
    pub fn load() -> Self {
        let preferences = match PreferencesMap::<String>::load(&APP_INFO, PREFS_PATH) {
            Ok(map) => map,
            Err(e) => {
                eprintln!("Error opening preferences {}", e);
                PreferencesMap::new()
            }
        };
        PreferenceManager {
            preferences: RwLock::new(preferences),
            path: PREFS_PATH,
        }
    }

    pub fn get<T: FromStr>(&self, key: &str) -> Option<T> {
        let prefs = self.preferences.read().ok()?;
        prefs.get(key).and_then(|s| s.parse::<T>().ok())
    }

    pub fn put<T: ToString>(&self, key: &str, value: T) {
        if let Ok(mut prefs) = self.preferences.write() {
            prefs.insert(key.to_string(), value.to_string());
        }
        self.store();
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut prefs) = self.preferences.write() {
            let _e = prefs.remove(key);
        }
        self.store();
    }

    fn store(&self) {
        if let Ok(prefs) = self.preferences.read() {
            let _ = prefs.save(&APP_INFO, self.path);
        }
    }
}

/// Settings given on the command line. Anything left `None` falls back to
/// the stored preferences and then to the defaults.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub device: Option<String>,
    pub speed_unit: Option<String>,
    pub debug: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudConfig {
    pub host: String,
    pub port: u16,
    pub device: Option<String>,
    pub speed_unit: SpeedUnit,
    pub debug: u8,
}

impl HudConfig {
    pub fn resolve(overrides: &Overrides, prefs: &PreferenceManager) -> Result<HudConfig> {
        let speed_unit = match overrides
            .speed_unit
            .clone()
            .or_else(|| prefs.get::<String>(SPEED_UNIT))
        {
            Some(unit) => unit.parse::<SpeedUnit>()?,
            None => SpeedUnit::default(),
        };

        Ok(HudConfig {
            host: overrides
                .host
                .clone()
                .or_else(|| prefs.get::<String>(GPSD_HOST))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides
                .port
                .or_else(|| prefs.get::<u16>(GPSD_PORT_KEY))
                .unwrap_or(GPSD_PORT),
            device: overrides
                .device
                .clone()
                .or_else(|| prefs.get::<String>(GPSD_DEVICE))
                .filter(|d| !d.is_empty()),
            speed_unit,
            debug: overrides
                .debug
                .or_else(|| prefs.get::<u8>(DEBUG_LEVEL))
                .unwrap_or(0),
        })
    }

    /// Remember this configuration for the next start.
    pub fn save(&self, prefs: &PreferenceManager) {
        prefs.put(GPSD_HOST, &self.host);
        prefs.put(GPSD_PORT_KEY, self.port);
        match &self.device {
            Some(device) => prefs.put(GPSD_DEVICE, device),
            None => prefs.remove(GPSD_DEVICE),
        }
        prefs.put(SPEED_UNIT, self.speed_unit);
        prefs.put(DEBUG_LEVEL, self.debug);
    }
}
