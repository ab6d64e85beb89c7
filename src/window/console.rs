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

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use log::{debug, error, info, warn};

use crate::event::{Event, EventManager};
use crate::window::frame::{Color, Frame};
use crate::window::{Notice, Renderer};

const CLEAR: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";
const BACKGROUND: &str = "\x1b[48;2;0;0;0m";

fn fg(color: Color) -> String {
    let (r, g, b) = color.components();
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Renders the display on an ANSI terminal.
///
/// Text is drawn on black, so the neutral palette blanks the readout.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    covered: bool,
    notice: Option<Notice>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        ConsoleRenderer {
            out,
            covered: false,
            notice: None,
        }
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let text = fg(frame.palette.text);
        let unit = fg(frame.palette.unit);
        write!(self.out, "{}{}", BACKGROUND, CLEAR)?;
        for (colour, value) in [
            (&text, &frame.heading),
            (&text, &frame.speed),
            (&unit, &frame.unit),
            (&text, &frame.date),
            (&text, &frame.time),
        ] {
            writeln!(self.out, "{}{}{}{}", BACKGROUND, colour, value, RESET)?;
        }
        // A pending notice is redrawn under every frame
        if let Some(notice) = self.notice {
            self.draw_notice(notice)?;
        }
        self.out.flush()
    }

    fn draw_notice(&mut self, notice: Notice) -> io::Result<()> {
        writeln!(
            self.out,
            "{}\n\n  {}\n  {}\n  Press Enter to dismiss.",
            RESET,
            notice.title(),
            notice.message()
        )
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn paint(&mut self, frame: &Frame) {
        if self.covered {
            return;
        }
        if let Err(e) = self.draw(frame) {
            warn!("Unable to draw display: {}", e);
        }
    }

    fn show_cover(&mut self) {
        self.covered = true;
        let _ = write!(self.out, "{}", CLEAR).and_then(|_| self.out.flush());
    }

    fn hide_cover(&mut self) {
        self.covered = false;
    }

    fn notify(&mut self, notice: Notice) {
        error!("{}: {}", notice.title(), notice.message());
        self.notice = Some(notice);
        let result = self.draw_notice(notice).and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Unable to show notice: {}", e);
        }
    }

    fn acknowledge(&mut self) {
        if let Some(notice) = self.notice.take() {
            debug!("{} dismissed", notice.title());
        }
    }
}

/// Maps a line typed by the operator to a command.
pub fn operator_command(line: &str) -> Option<Event> {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" => Some(Event::Quit),
        "r" | "retry" => Some(Event::Retry),
        "" => Some(Event::Acknowledge),
        _ => None,
    }
}

/// Forwards operator commands typed on stdin to the event manager.
pub fn spawn_operator_input(events: Arc<EventManager>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if let Some(event) = operator_command(&line) {
                        info!("Operator requested {:?}", event);
                        events.notify_listeners(event);
                    }
                }
                Err(e) => {
                    warn!("Operator input closed: {}", e);
                    break;
                }
            }
        }
    })
}
