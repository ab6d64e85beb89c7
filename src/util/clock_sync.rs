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

use std::io;
use std::process::Command;

use chrono::NaiveDateTime;
use log::{info, warn};

const GPS_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_SET_FORMAT: &str = "%Y%m%d %H:%M:%S";

/// Something able to set the system clock to a UTC time.
pub trait SystemClock {
    /// `stamp` is in `YYYYMMDD HH:MM:SS` form. Returns whether the clock was set.
    fn set_utc(&mut self, stamp: &str) -> io::Result<bool>;
}

/// Sets the clock with `sudo date`.
pub struct SudoDate;

impl SystemClock for SudoDate {
    fn set_utc(&mut self, stamp: &str) -> io::Result<bool> {
        let status = Command::new("sudo")
            .arg("date")
            .arg("-u")
            .arg(format!("--set={}", stamp))
            .status()?;
        Ok(status.success())
    }
}

pub struct ClockSync<C: SystemClock> {
    clock: C,
}

impl<C: SystemClock> ClockSync<C> {
    pub fn new(clock: C) -> Self {
        ClockSync { clock }
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Set the system clock from a gpsd `time` value. Failure is never fatal.
    pub fn try_set_from_utc(&mut self, utc: Option<&str>) -> bool {
        let utc = match utc {
            Some(utc) if !utc.is_empty() => utc,
            _ => return false,
        };
        let Some(stamp) = date_set_stamp(utc) else {
            warn!("Ignoring malformed GPS time {:?}", utc);
            return false;
        };
        match self.clock.set_utc(&stamp) {
            Ok(true) => {
                info!("System clock set from GPS to {} UTC", stamp);
                true
            }
            Ok(false) => {
                warn!("Setting the system clock to {} was refused", stamp);
                false
            }
            Err(e) => {
                warn!("Unable to set the system clock: {}", e);
                false
            }
        }
    }
}

// "2024-06-01T12:00:00.000Z" -> "20240601 12:00:00"
fn date_set_stamp(utc: &str) -> Option<String> {
    let seconds = utc.get(..19)?;
    let time = NaiveDateTime::parse_from_str(seconds, GPS_TIME_FORMAT).ok()?;
    Some(time.format(DATE_SET_FORMAT).to_string())
}
