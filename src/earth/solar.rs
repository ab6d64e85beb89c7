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

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use log::debug;

use crate::earth::coordinate::Coordinate;
use crate::error::{HudError, Result};

// Apparent sunrise and sunset, allowing for refraction and the solar disc.
const HORIZON_DEG: f64 = -0.833;

/// When the sun is up on a given day at a given place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Daylight {
    Between {
        sunrise: DateTime<Utc>,
        sunset: DateTime<Utc>,
    },
    PolarDay,
    PolarNight,
}

impl Daylight {
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        match self {
            Daylight::Between { sunrise, sunset } => *sunrise <= now && now < *sunset,
            Daylight::PolarDay => true,
            Daylight::PolarNight => false,
        }
    }
}

/// Source of sunrise and sunset times.
pub trait Ephemeris {
    fn daylight(&self, at: &Coordinate, date: NaiveDate) -> Daylight;
}

/// Low precision solar position, good to a couple of minutes.
pub struct SolarEphemeris;

impl Ephemeris for SolarEphemeris {
    fn daylight(&self, at: &Coordinate, date: NaiveDate) -> Daylight {
        let midnight = date.and_time(NaiveTime::default()).and_utc();

        // Solar noon in minutes after UTC midnight
        let eot = equation_of_time(date.ordinal());
        let noon_minutes = 720.0 - 4.0 * at.get_longitude() - eot;
        let noon = midnight + Duration::seconds((noon_minutes * 60.0) as i64);

        let decl = solar_declination(noon).to_radians();
        let lat = at.get_latitude().to_radians();
        let cos_hour_angle =
            (HORIZON_DEG.to_radians().sin() - lat.sin() * decl.sin()) / (lat.cos() * decl.cos());

        if cos_hour_angle < -1.0 {
            return Daylight::PolarDay;
        }
        if cos_hour_angle > 1.0 {
            return Daylight::PolarNight;
        }

        let half_day_seconds = (cos_hour_angle.acos().to_degrees() * 4.0 * 60.0) as i64;
        Daylight::Between {
            sunrise: noon - Duration::seconds(half_day_seconds),
            sunset: noon + Duration::seconds(half_day_seconds),
        }
    }
}

pub(crate) fn solar_declination(datetime: DateTime<Utc>) -> f64 {
    let timestamp = datetime.timestamp() as f64;

    // Days since J2000 epoch (Jan 1, 2000, 12:00 UTC)
    let days_since_j2000 = (timestamp - 946728000.0) / 86400.0;

    // Mean longitude of the Sun (deg)
    let mean_long = (280.460 + 0.9856474 * days_since_j2000) % 360.0;

    // Mean anomaly of the Sun (deg)
    let mean_anom = (357.528 + 0.9856003 * days_since_j2000) % 360.0;
    let mean_anom_rad = mean_anom.to_radians();

    // Ecliptic longitude (deg)
    let eclip_long = (mean_long + 1.915 * mean_anom_rad.sin() + 0.020 * (2.0 * mean_anom_rad).sin()) % 360.0;
    let eclip_long_rad = eclip_long.to_radians();

    let obliquity = 23.439_f64.to_radians();

    (eclip_long_rad.sin() * obliquity.sin()).asin().to_degrees()
}

// Approximate equation of time, in minutes
fn equation_of_time(day_of_year: u32) -> f64 {
    let b_deg = 360.0 / 365.0 * (day_of_year as f64 - 81.0);
    let b_rad = b_deg.to_radians();

    9.87 * (2.0 * b_rad).sin()
        - 7.53 * b_rad.cos()
        - 1.5  * b_rad.sin()
}

/// The calendar day as the sun sees it at this longitude.
pub(crate) fn local_solar_date(at: &Coordinate, now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::seconds((at.get_longitude() * 240.0) as i64)).date_naive()
}

struct CachedDaylight {
    date: NaiveDate,
    grid: (i32, i32),
    daylight: Daylight,
}

/// Decides between the day and night palettes.
///
/// The render loop asks on every report, so the last answer from the
/// ephemeris is kept until the date or position changes.
pub struct DayNightEvaluator<E: Ephemeris> {
    ephemeris: E,
    cached: Option<CachedDaylight>,
}

impl<E: Ephemeris> DayNightEvaluator<E> {
    pub fn new(ephemeris: E) -> Self {
        DayNightEvaluator { ephemeris, cached: None }
    }

    pub fn is_daytime(
        &mut self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let at = Coordinate::from_parts(latitude, longitude).ok_or(HudError::MissingLocation)?;
        let date = local_solar_date(&at, now);
        let grid = at.grid_key();

        let daylight = match &self.cached {
            Some(c) if c.date == date && c.grid == grid => c.daylight,
            _ => {
                let daylight = self.ephemeris.daylight(&at, date);
                debug!("Daylight for {:?} on {}: {:?}", at, date, daylight);
                self.cached = Some(CachedDaylight { date, grid, daylight });
                daylight
            }
        };
        Ok(daylight.contains(now))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::{NaiveDate, TimeZone, Timelike, Utc};

    use super::*;

    #[test]
    fn test_declination() {
        let datetime = Utc.with_ymd_and_hms(2023, 6, 21, 12, 0, 45);
        assert_eq!(solar_declination(datetime.unwrap()).round(), 23.0);
    }

    #[test]
    // Data from https://gml.noaa.gov/grad/solcalc/
    fn test_declination_equinox() {
        let datetime = Utc.with_ymd_and_hms(2025, 9, 22, 18, 19, 0);
        assert_eq!(solar_declination(datetime.unwrap()).round(), 0.0);
    }

    #[test]
    // Data from https://gml.noaa.gov/grad/solcalc/
    fn test_declination_november() {
        let datetime = Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0);
        assert_eq!(solar_declination(datetime.unwrap()).round(), -15.0);
    }

    #[test]
    // Data from https://gml.noaa.gov/grad/solcalc/
    fn test_declination_february() {
        let datetime = Utc.with_ymd_and_hms(2025, 2, 11, 15, 34, 0);
        assert_eq!(solar_declination(datetime.unwrap()).round(), -14.0);
    }

    #[test]
    fn test_equator_equinox_sun_times() {
        let at = Coordinate::new(0.0, 0.0);
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        match SolarEphemeris.daylight(&at, date) {
            Daylight::Between { sunrise, sunset } => {
                let rise = sunrise.hour() * 60 + sunrise.minute();
                let set = sunset.hour() * 60 + sunset.minute();
                assert!((350..=380).contains(&rise), "sunrise at {}", sunrise);
                assert!((1080..=1105).contains(&set), "sunset at {}", sunset);
            }
            other => panic!("Expected a sunrise and sunset, got {:?}", other),
        }
    }

    #[test]
    fn test_daylight_window_is_half_open() {
        let sunrise = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let sunset = Utc.with_ymd_and_hms(2024, 6, 2, 0, 30, 0).unwrap();
        let daylight = Daylight::Between { sunrise, sunset };

        assert!(!daylight.contains(sunrise - Duration::seconds(1)));
        assert!(daylight.contains(sunrise));
        assert!(daylight.contains(sunset - Duration::seconds(1)));
        assert!(!daylight.contains(sunset));

        assert!(Daylight::PolarDay.contains(sunrise));
        assert!(Daylight::PolarDay.contains(sunset));
        assert!(!Daylight::PolarNight.contains(sunrise));
        assert!(!Daylight::PolarNight.contains(sunset));
    }

    #[test]
    fn test_polar_day_and_night() {
        let at = Coordinate::new(80.0, 15.0);
        let june = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let december = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
        assert_eq!(SolarEphemeris.daylight(&at, june), Daylight::PolarDay);
        assert_eq!(SolarEphemeris.daylight(&at, december), Daylight::PolarNight);
    }

    #[test]
    fn test_is_daytime_pennsylvania() {
        let mut evaluator = DayNightEvaluator::new(SolarEphemeris);
        // 08:00 and 23:00 local daylight time
        let morning = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 6, 1, 3, 0, 0).unwrap();
        assert!(evaluator.is_daytime(Some(40.0), Some(-75.0), morning).unwrap());
        assert!(!evaluator.is_daytime(Some(40.0), Some(-75.0), night).unwrap());
    }

    #[test]
    fn test_is_daytime_evening_after_utc_midnight() {
        let mut evaluator = DayNightEvaluator::new(SolarEphemeris);
        // 19:00 local on a June evening is still light although UTC has rolled over
        let evening = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        assert!(evaluator.is_daytime(Some(40.0), Some(-75.0), evening).unwrap());
    }

    #[test]
    fn test_is_daytime_sydney() {
        let mut evaluator = DayNightEvaluator::new(SolarEphemeris);
        let noon = Utc.with_ymd_and_hms(2024, 6, 1, 2, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        assert!(evaluator.is_daytime(Some(-33.87), Some(151.21), noon).unwrap());
        assert!(!evaluator.is_daytime(Some(-33.87), Some(151.21), evening).unwrap());
    }

    #[test]
    fn test_missing_location() {
        let mut evaluator = DayNightEvaluator::new(SolarEphemeris);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(matches!(evaluator.is_daytime(None, Some(-75.0), now), Err(HudError::MissingLocation)));
        assert!(matches!(evaluator.is_daytime(Some(40.0), None, now), Err(HudError::MissingLocation)));
        assert!(matches!(evaluator.is_daytime(None, None, now), Err(HudError::MissingLocation)));
    }

    struct CountingEphemeris {
        calls: Cell<usize>,
    }

    impl Ephemeris for CountingEphemeris {
        fn daylight(&self, _at: &Coordinate, _date: NaiveDate) -> Daylight {
            self.calls.set(self.calls.get() + 1);
            Daylight::PolarDay
        }
    }

    #[test]
    fn test_repeated_calls_use_cache() {
        let mut evaluator = DayNightEvaluator::new(CountingEphemeris { calls: Cell::new(0) });
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        for second in 0..30 {
            let t = now + Duration::seconds(second);
            assert!(evaluator.is_daytime(Some(40.0), Some(-75.0), t).unwrap());
        }
        assert_eq!(evaluator.ephemeris.calls.get(), 1);

        // A move off the grid cell asks again
        evaluator.is_daytime(Some(41.0), Some(-75.0), now).unwrap();
        assert_eq!(evaluator.ephemeris.calls.get(), 2);

        // So does a new day
        evaluator.is_daytime(Some(41.0), Some(-75.0), now + Duration::days(1)).unwrap();
        assert_eq!(evaluator.ephemeris.calls.get(), 3);
    }
}
