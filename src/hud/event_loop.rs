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

use async_channel::Receiver;
use async_std::task;
use chrono::Local;
use log::{debug, error, info};

use crate::earth::solar::Ephemeris;
use crate::error::Result;
use crate::event::Event;
use crate::hud::{Directive, Hud};
use crate::util::clock_sync::SystemClock;
use crate::util::gpsd_link::{FixStreamClient, StreamEvent};
use crate::window::{Notice, Renderer};

const ACQUIRE_POLL: Duration = Duration::from_secs(1);
const REPAINT_TICK: Duration = Duration::from_secs(1);

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The operator closed the display
    Closed,
    /// gpsd went away mid-session
    Hangup,
}

pub struct EventLoop<E: Ephemeris, C: SystemClock, R: Renderer> {
    hud: Hud<E, C>,
    client: FixStreamClient,
    renderer: R,
    control: Receiver<Event>,
    tick: Duration,
    poll: Duration,
}

impl<E: Ephemeris, C: SystemClock, R: Renderer> EventLoop<E, C, R> {
    pub fn new(hud: Hud<E, C>, client: FixStreamClient, renderer: R, control: Receiver<Event>) -> Self {
        EventLoop {
            hud,
            client,
            renderer,
            control,
            tick: REPAINT_TICK,
            poll: ACQUIRE_POLL,
        }
    }

    /// Overrides the repaint tick and the acquisition poll interval.
    pub fn with_timing(mut self, tick: Duration, poll: Duration) -> Self {
        self.tick = tick;
        self.poll = poll;
        self
    }

    #[cfg(test)]
    pub fn hud(&self) -> &Hud<E, C> {
        &self.hud
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[cfg(test)]
    pub fn client(&self) -> &FixStreamClient {
        &self.client
    }

    /// Connects, waits for a first fix and then runs until the display is
    /// closed or gpsd goes away.
    pub async fn start(&mut self) -> Exit {
        match self.client.open().await {
            Ok(()) => match self.acquire().await {
                Ok(Some(exit)) => return exit,
                Ok(None) => {}
                Err(e) => {
                    error!("Lost gpsd while waiting for a fix: {}", e);
                    self.renderer.hide_cover();
                    self.renderer.notify(Notice::StreamStopped);
                    return Exit::Hangup;
                }
            },
            Err(_) => self.renderer.notify(Notice::ConnectionFailed),
        }
        self.run().await
    }

    /// Keeps the screen covered until gpsd reports a 2D or 3D fix. Returns
    /// the exit if the operator closes the display first.
    pub async fn acquire(&mut self) -> Result<Option<Exit>> {
        info!("Waiting for a GPS fix");
        self.renderer.show_cover();
        loop {
            if let Some(exit) = self.handle_control().await {
                self.renderer.hide_cover();
                return Ok(Some(exit));
            }
            match self.client.next_event(self.poll).await {
                StreamEvent::Readable(report) if report.has_fix() => {
                    self.hud.on_report(&report);
                    break;
                }
                StreamEvent::Readable(_) => task::sleep(self.poll).await,
                StreamEvent::Idle => {}
                StreamEvent::Hangup(e) => return Err(e),
            }
        }
        self.renderer.hide_cover();
        info!("GPS fix acquired ({:?})", self.hud.get_state().get_last_mode());
        self.paint();
        Ok(None)
    }

    pub async fn run(&mut self) -> Exit {
        loop {
            if let Some(exit) = self.handle_control().await {
                return exit;
            }

            match self.client.next_event(self.tick).await {
                StreamEvent::Readable(report) => {
                    if !report.is_position() {
                        debug!("Skipping {} report", report.get_class().name());
                        continue;
                    }
                    if self.hud.on_report(&report) == Directive::RenewStream {
                        self.renew().await;
                    }
                    self.paint();
                }
                StreamEvent::Idle => self.paint(),
                StreamEvent::Hangup(e) => {
                    error!("gpsd session ended: {}", e);
                    self.renderer.notify(Notice::StreamStopped);
                    return Exit::Hangup;
                }
            }
        }
    }

    /// Works through the operator commands queued since the last look.
    async fn handle_control(&mut self) -> Option<Exit> {
        while let Ok(event) = self.control.try_recv() {
            match event {
                Event::Quit => {
                    info!("Display closed");
                    return Some(Exit::Closed);
                }
                Event::Retry => {
                    self.renderer.acknowledge();
                    self.retry().await;
                }
                Event::Acknowledge => self.renderer.acknowledge(),
            }
        }
        None
    }

    async fn renew(&mut self) {
        if self.client.reconnect().await.is_err() {
            self.renderer.notify(Notice::ConnectionFailed);
        }
        debug!("gpsd connection is {:?}", self.client.get_state());
    }

    async fn retry(&mut self) {
        if self.client.is_connected() {
            debug!("Retry ignored, already watching");
            return;
        }
        self.renew().await;
    }

    fn paint(&mut self) {
        let frame = self.hud.frame(&Local::now());
        self.renderer.paint(&frame);
    }
}
