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

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use async_std::task;
use clap::Parser;
use log::{error, info};

use earth::solar::SolarEphemeris;
use event::{Event, EventManager};
use hud::event_loop::{EventLoop, Exit};
use hud::Hud;
use preference::{HudConfig, Overrides, PreferenceManager};
use util::clock_sync::SudoDate;
use util::gpsd_link::FixStreamClient;
use util::Logger;
use window::console::{spawn_operator_input, ConsoleRenderer};

mod earth;
mod error;
mod event;
mod hud;
mod model;
mod preference;
mod util;
mod window;

/// Heads-up display of GPS speed and heading, fed by gpsd.
///
/// Type `q` and Enter to close the display, `r` to retry a failed gpsd connection.
/// A bare Enter dismisses a notice.
#[derive(Debug, Parser)]
#[command(version, about, long_about)]
struct Args {
    /// gpsd host
    #[arg(short = 'H', long)]
    host: Option<String>,
    /// gpsd port
    #[arg(short, long)]
    port: Option<u16>,
    /// Device for gpsd to watch
    #[arg(short = 'D', long)]
    device: Option<String>,
    /// Speed unit: mph, kmh or knots
    #[arg(short, long)]
    unit: Option<String>,
    /// More logging, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
    /// Remember these settings for the next start
    #[arg(long)]
    save: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            device: self.device.clone(),
            speed_unit: self.unit.clone(),
            debug: (self.debug > 0).then_some(self.debug),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let prefs = PreferenceManager::load();
    let config = HudConfig::resolve(&args.overrides(), &prefs);
    let _logger = Logger::new(config.as_ref().map(|c| c.debug).unwrap_or(args.debug));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if args.save {
        config.save(&prefs);
    }
    info!(
        "Starting display for gpsd at {}:{} in {}",
        config.host, config.port, config.speed_unit
    );

    let events = Arc::new(EventManager::new());
    let control = events.register_listener(&[Event::Quit, Event::Retry, Event::Acknowledge]);
    spawn_operator_input(events.clone());

    let hud = Hud::new(config.speed_unit, SolarEphemeris, SudoDate);
    let client = FixStreamClient::new(&config.host, config.port, config.device.clone());
    let mut event_loop = EventLoop::new(hud, client, ConsoleRenderer::new(io::stdout()), control);

    match task::block_on(event_loop.start()) {
        Exit::Closed => ExitCode::SUCCESS,
        Exit::Hangup => ExitCode::FAILURE,
    }
}
