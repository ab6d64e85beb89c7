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

use std::collections::HashMap;
use std::sync::RwLock;

use async_channel::{Receiver, Sender, TrySendError};
use log::warn;

/// Commands from the operator to the running display.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Event {
    /// The display was closed
    Quit,
    /// Try the gpsd connection again
    Retry,
    /// The operator has read the notice on screen
    Acknowledge,
}

pub struct EventManager {
    listeners: RwLock<HashMap<Event, Vec<Sender<Event>>>>,
}

impl EventManager {
    pub fn new() -> Self {
        EventManager {
            listeners: RwLock::new(HashMap::new()),
        }
    }

    // Registers a listener for multiple `events`.
    // Returns a receiver that will receive copies of those events when notified.
    pub fn register_listener(&self, events: &[Event]) -> Receiver<Event> {
        let (tx, rx) = async_channel::unbounded::<Event>();

        if let Ok(mut listeners) = self.listeners.write() {
            for event in events.iter().cloned() {
                listeners.entry(event).or_insert_with(Vec::new).push(tx.clone());
            }
        }
        rx
    }

    /// Notify only listeners registered for `ev`.
    pub fn notify_listeners(&self, ev: Event) {
        if let Ok(listeners) = self.listeners.read() {
            if let Some(vec) = listeners.get(&ev) {
                for listener in vec.iter() {
                    match listener.try_send(ev.clone()) {
                        Ok(_) => {}
                        Err(TrySendError::Closed(_)) => {
                            warn!("Listener channel closed");
                        }
                        Err(TrySendError::Full(_)) => {}
                    }
                }
            }
        }
        if let Ok(mut listeners) = self.listeners.write() {
            // Remove closed senders and remove empty vectors
            listeners.retain(|_, v| {
                v.retain(|l| !l.is_closed());
                !v.is_empty()
            });
        }
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}
