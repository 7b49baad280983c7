// Wall-clock display text, refreshed independently of the engine
use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::RwLock;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WallClockText {
    pub time: String,
    pub date: String,
}

impl WallClockText {
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            time: now.format("%H:%M:%S").to_string(),
            date: now.format("%A, %b %d, %Y").to_string(),
        }
    }
}

#[derive(Debug)]
pub struct WallClock {
    text: RwLock<WallClockText>,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            text: RwLock::new(WallClockText::at(Local::now())),
        }
    }

    pub fn refresh(&self) {
        let text = WallClockText::at(Local::now());
        *self.text.write().unwrap_or_else(|e| e.into_inner()) = text;
    }

    pub fn read(&self) -> WallClockText {
        self.text.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}
