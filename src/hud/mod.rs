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

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use log::{info, warn};

use crate::earth::solar::{DayNightEvaluator, Ephemeris};
use crate::model::display_state::DisplayState;
use crate::model::fix_report::FixReport;
use crate::util::clock_format::ClockFormat;
use crate::util::clock_sync::{ClockSync, SystemClock};
use crate::util::direction_format::Direction;
use crate::util::speed_format::{SpeedFormat, SpeedUnit};
use crate::window::frame::{Frame, Palette};

pub mod event_loop;

const PLACEHOLDER: &str = "-";

/// What the event loop has to do after a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Continue,
    /// The fix was lost; start a new watch session
    RenewStream,
}

/// Owns the display state and turns reports into frames.
pub struct Hud<E: Ephemeris, C: SystemClock> {
    state: DisplayState,
    speed_format: SpeedFormat,
    clock_format: ClockFormat,
    day_night: DayNightEvaluator<E>,
    clock_sync: ClockSync<C>,
    clock_synced: bool,
}

impl<E: Ephemeris, C: SystemClock> Hud<E, C> {
    pub fn new(unit: SpeedUnit, ephemeris: E, clock: C) -> Self {
        Hud {
            state: DisplayState::new(),
            speed_format: SpeedFormat::new(unit),
            clock_format: ClockFormat::new(),
            day_night: DayNightEvaluator::new(ephemeris),
            clock_sync: ClockSync::new(clock),
            clock_synced: false,
        }
    }

    pub fn get_state(&self) -> &DisplayState {
        &self.state
    }

    #[cfg(test)]
    pub fn clock_sync(&self) -> &ClockSync<C> {
        &self.clock_sync
    }

    #[cfg(test)]
    pub fn is_clock_synced(&self) -> bool {
        self.clock_synced
    }

    pub fn on_report(&mut self, report: &FixReport) -> Directive {
        if !report.is_position() {
            return Directive::Continue;
        }

        let mode = report.get_mode();
        self.state.set_mode(mode);

        let directive = if !mode.has_fix() {
            info!("No GPS fix ({:?})", mode);
            // The clock is set again once the fix comes back
            self.clock_synced = false;
            Directive::RenewStream
        } else {
            if !self.clock_synced {
                self.clock_synced = self.clock_sync.try_set_from_utc(report.get_utc());
            }
            Directive::Continue
        };

        self.state.apply_fields(report);
        directive
    }

    pub fn frame<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Frame
    where
        Tz::Offset: Display,
    {
        let (heading, speed) = if self.state.has_fix() {
            (
                Direction::from_heading(self.state.get_last_heading()).to_string(),
                self.speed_format.format(self.state.get_last_speed()),
            )
        } else {
            (PLACEHOLDER.to_string(), PLACEHOLDER.to_string())
        };

        Frame {
            heading,
            speed,
            unit: self.speed_format.label(),
            date: self.clock_format.format_date(now),
            time: self.clock_format.format_time(now),
            palette: self.palette(now.with_timezone(&Utc)),
        }
    }

    fn palette(&mut self, now: DateTime<Utc>) -> Palette {
        if !self.state.has_fix() || !self.state.has_location() {
            return Palette::NEUTRAL;
        }
        match self.day_night.is_daytime(self.state.get_latitude(), self.state.get_longitude(), now) {
            Ok(true) => Palette::DAY,
            Ok(false) => Palette::NIGHT,
            Err(e) => {
                warn!("{}", e);
                Palette::NEUTRAL
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::earth::solar::SolarEphemeris;
    use crate::model::fix_report::FixMode;

    /// Accepts every clock change and remembers it.
    #[derive(Default)]
    pub(crate) struct RecordingClock {
        pub(crate) calls: Vec<String>,
        pub(crate) refuse: bool,
    }

    impl SystemClock for RecordingClock {
        fn set_utc(&mut self, stamp: &str) -> io::Result<bool> {
            self.calls.push(stamp.to_string());
            Ok(!self.refuse)
        }
    }

    const FULL_FIX: &str = r#"{"class":"TPV","mode":3,"speed":10,"track":30,"lat":40.0,"lon":-75.0,"time":"2024-06-01T12:00:00Z"}"#;

    fn report(json: &str) -> FixReport {
        FixReport::parse(json).unwrap()
    }

    fn hud() -> Hud<SolarEphemeris, RecordingClock> {
        Hud::new(SpeedUnit::Mph, SolarEphemeris, RecordingClock::default())
    }

    #[test]
    fn test_first_fix() {
        let mut hud = hud();
        assert_eq!(hud.get_state().get_last_mode(), FixMode::Unknown);

        assert_eq!(hud.on_report(&report(FULL_FIX)), Directive::Continue);

        let state = hud.get_state();
        assert_eq!(state.get_last_mode(), FixMode::Fix3D);
        assert_eq!(state.get_last_speed(), 10.0);
        assert_eq!(state.get_last_heading(), 30.0);
        assert_eq!(hud.clock_sync().clock().calls, vec!["20240601 12:00:00".to_string()]);
        assert!(hud.is_clock_synced());

        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let frame = hud.frame(&now);
        assert_eq!(frame.heading, "NE");
        assert_eq!(frame.speed, "22");
        assert_eq!(frame.unit, "MPH");
        assert_eq!(frame.date, "Sat, Jun 1");
        assert_eq!(frame.time, "12:00 PM");
        assert_eq!(frame.palette, Palette::DAY);

        // Clock is only set once per fix
        hud.on_report(&report(FULL_FIX));
        assert_eq!(hud.clock_sync().clock().calls.len(), 1);
    }

    #[test]
    fn test_fix_lost() {
        let mut hud = hud();
        hud.on_report(&report(FULL_FIX));

        assert_eq!(hud.on_report(&report(r#"{"class":"TPV","mode":0}"#)), Directive::RenewStream);
        assert_eq!(hud.get_state().get_last_mode(), FixMode::Unknown);

        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let frame = hud.frame(&now);
        assert_eq!(frame.speed, "-");
        assert_eq!(frame.heading, "-");
        assert_eq!(frame.unit, "MPH");
        assert_eq!(frame.palette, Palette::NEUTRAL);
    }

    #[test]
    fn test_renew_once_per_lost_fix_report() {
        let mut hud = hud();
        let reports = [
            r#"{"class":"TPV","mode":0}"#,
            r#"{"class":"TPV","mode":1}"#,
            FULL_FIX,
            r#"{"class":"SKY","satellites":[]}"#,
            r#"{"class":"TPV","mode":0}"#,
        ];
        let renewals = reports
            .iter()
            .map(|r| hud.on_report(&report(r)))
            .filter(|d| *d == Directive::RenewStream)
            .count();
        assert_eq!(renewals, 3);
    }

    #[test]
    fn test_speed_only_report() {
        let mut hud = hud();
        hud.on_report(&report(FULL_FIX));
        hud.on_report(&report(r#"{"class":"TPV","mode":3,"speed":20.0}"#));
        let state = hud.get_state();
        assert_eq!(state.get_last_speed(), 20.0);
        assert_eq!(state.get_last_heading(), 30.0);
        assert_eq!(state.get_last_mode(), FixMode::Fix3D);
    }

    #[test]
    fn test_other_reports_are_ignored() {
        let mut hud = hud();
        hud.on_report(&report(FULL_FIX));
        let before = hud.get_state().clone();
        assert_eq!(
            hud.on_report(&report(r#"{"class":"DEVICES","devices":[]}"#)),
            Directive::Continue
        );
        assert_eq!(hud.get_state(), &before);
    }

    #[test]
    fn test_clock_set_again_after_fix_lost() {
        let mut hud = hud();
        hud.on_report(&report(FULL_FIX));
        hud.on_report(&report(r#"{"class":"TPV","mode":1}"#));
        assert!(!hud.is_clock_synced());
        hud.on_report(&report(FULL_FIX));
        assert_eq!(hud.clock_sync().clock().calls.len(), 2);
    }

    #[test]
    fn test_refused_clock_retried_on_next_fix() {
        let mut hud = Hud::new(
            SpeedUnit::Kph,
            SolarEphemeris,
            RecordingClock { refuse: true, ..Default::default() },
        );
        hud.on_report(&report(FULL_FIX));
        hud.on_report(&report(FULL_FIX));
        assert!(!hud.is_clock_synced());
        assert_eq!(hud.clock_sync().clock().calls.len(), 2);
    }

    #[test]
    fn test_fix_without_time_does_not_touch_clock() {
        let mut hud = hud();
        hud.on_report(&report(r#"{"class":"TPV","mode":2,"speed":1.0}"#));
        assert!(hud.clock_sync().clock().calls.is_empty());
        assert!(!hud.is_clock_synced());
    }

    #[test]
    fn test_night_palette() {
        let mut hud = hud();
        hud.on_report(&report(FULL_FIX));
        let night = Utc.with_ymd_and_hms(2024, 6, 1, 3, 0, 0).unwrap();
        assert_eq!(hud.frame(&night).palette, Palette::NIGHT);
    }

    #[test]
    fn test_fix_without_location_is_neutral() {
        let mut hud = hud();
        hud.on_report(&report(r#"{"class":"TPV","mode":2,"speed":10.0,"track":200.0}"#));
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let frame = hud.frame(&now);
        assert_eq!(frame.speed, "22");
        assert_eq!(frame.heading, "S");
        assert_eq!(frame.palette, Palette::NEUTRAL);
    }

    #[test]
    fn test_units() {
        let mut hud = Hud::new(SpeedUnit::Knots, SolarEphemeris, RecordingClock::default());
        hud.on_report(&report(FULL_FIX));
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let frame = hud.frame(&now);
        assert_eq!(frame.speed, "19");
        assert_eq!(frame.unit, "KNOTS");
    }
}
