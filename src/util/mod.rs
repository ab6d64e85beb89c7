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

#![forbid(unsafe_code)]

use std::error::Error;

use log::LevelFilter;
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use simplelog::{ColorChoice, CombinedLogger, Config, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};

pub(crate) mod clock_format;
pub(crate) mod clock_sync;
pub(crate) mod direction_format;
pub(crate) mod gpsd_link;
pub(crate) mod speed_format;

const LOG_FILE: &str = "gps-hud.log";

pub struct Logger;

impl Logger {
    /// `debug` raises the terminal level: 0 warnings, 1 debug, more for trace.
    pub fn new(debug: u8) -> Self {
        Self::init_logger(Self::terminal_level(debug));
        Logger
    }

    fn terminal_level(debug: u8) -> LevelFilter {
        match debug {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn init_logger(terminal_level: LevelFilter) {
        if let Some(home_path) = home::home_dir() {
            let log_path = home_path.join(LOG_FILE);
            let condition = RollingConditionBasic::new()
                .daily()
                .max_size(1024 * 1024);
            let file_appender =
                BasicRollingFileAppender::new(log_path, condition, 2);
            match file_appender {
                Ok(file) => {
                    let config = ConfigBuilder::new()
                        .set_time_offset_to_local()
                        .unwrap_or_else(|builder| builder)
                        .build();
                    let config2 = ConfigBuilder::new()
                        .set_location_level(LevelFilter::Error)
                        .set_time_format_rfc3339()
                        .set_time_offset_to_local()
                        .unwrap_or_else(|builder| builder)
                        .build();
                    CombinedLogger::init(vec![
                        TermLogger::new(
                            terminal_level,
                            config,
                            TerminalMode::Stderr,
                            ColorChoice::Auto,
                        ),
                        WriteLogger::new(
                            terminal_level.max(LevelFilter::Info),
                            config2,
                            file,
                        ),
                    ]).unwrap_or_else(|e| {
                        Self::print_error(&e);
                    });
                    return;
                }
                Err(e) => {
                    Self::print_error(&e);
                }
            }
        }
        TermLogger::init(
            terminal_level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ).unwrap_or_else(|e| {
            Self::print_error(&e);
        });
    }

    fn print_error(e: &dyn Error) {
        eprintln!("Unable to initiate logger: {}", e);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        log::logger().flush();
    }
}
