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

pub mod console;
pub mod frame;

use crate::window::frame::Frame;

/// Operator facing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ConnectionFailed,
    StreamStopped,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::ConnectionFailed => "Socket Error",
            Notice::StreamStopped => "GPSD Error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::ConnectionFailed => {
                "Failed to connect to gpsd socket. Make sure that gpsd is running."
            }
            Notice::StreamStopped => "GPSD has stopped sending data.",
        }
    }
}

/// Draws the display. Implementations only see composed text and colours.
pub trait Renderer {
    fn paint(&mut self, frame: &Frame);

    /// Blank the whole screen while waiting for a first fix.
    fn show_cover(&mut self);

    fn hide_cover(&mut self);

    /// Show a notice. It stays up until acknowledged.
    fn notify(&mut self, notice: Notice);

    fn acknowledge(&mut self);
}
