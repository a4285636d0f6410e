//! Round state: the current title, the countdown, and their transitions.

use crate::catalog::{Catalog, Category, CategorySettings, Item};
use rand::Rng;

/// Default round length in minutes.
pub const DEFAULT_ROUND_MINUTES: u32 = 3;

/// Owns the per-game mutable state. All mutation goes through the transition
/// methods below; the render layer only reads.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    settings: CategorySettings,
    current: Option<Item>,
    seconds_remaining: u32,
    timer_minutes: u32,
    time_up_fired: bool,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_minutes(catalog, DEFAULT_ROUND_MINUTES)
    }

    pub fn with_minutes(catalog: Catalog, minutes: u32) -> Self {
        Self {
            catalog,
            settings: CategorySettings::default(),
            current: None,
            seconds_remaining: 0,
            // Keep minutes * 60 representable as seconds.
            timer_minutes: minutes.clamp(1, u32::MAX / 60),
            time_up_fired: false,
        }
    }

    /// Swap in a newly loaded catalog. The current title and countdown are
    /// untouched; only subsequent picks see the new titles.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Draw a uniformly random title from the eligible set and restart the
    /// countdown. With nothing eligible this is a silent no-op. Repeats are
    /// allowed; an active countdown is simply overwritten.
    pub fn pick_random(&mut self, rng: &mut impl Rng) -> Option<&Item> {
        let eligible = self.catalog.eligible(&self.settings);
        if eligible.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..eligible.len());
        let picked = eligible[index].clone();
        self.current = Some(picked);
        self.seconds_remaining = self.timer_minutes * 60;
        self.time_up_fired = false;
        self.current.as_ref()
    }

    /// Advance the countdown by one second. Returns `true` exactly when the
    /// round expires: the 1 -> 0 transition with a title on display. Further
    /// ticks at zero neither decrement nor fire again.
    pub fn tick(&mut self) -> bool {
        if self.seconds_remaining == 0 {
            return false;
        }

        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 && self.current.is_some() && !self.time_up_fired {
            self.time_up_fired = true;
            return true;
        }
        false
    }

    /// Adjust the round length, floored at one minute. Shortening below the
    /// running countdown clamps the remaining time down; lengthening never
    /// clamps upward.
    pub fn adjust_timer(&mut self, delta_minutes: i32) {
        let minutes = i64::from(self.timer_minutes) + i64::from(delta_minutes);
        // Keep minutes * 60 representable as seconds.
        self.timer_minutes = minutes.clamp(1, i64::from(u32::MAX / 60)) as u32;

        let cap = self.timer_minutes * 60;
        if self.seconds_remaining > cap {
            self.seconds_remaining = cap;
        }
    }

    /// Flip a category's enabled bit. The current title stays put; only
    /// subsequent picks are affected.
    pub fn toggle_category(&mut self, category: Category) {
        self.settings.toggle(category);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &CategorySettings {
        &self.settings
    }

    pub fn current(&self) -> Option<&Item> {
        self.current.as_ref()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn timer_minutes(&self) -> u32 {
        self.timer_minutes
    }

    pub fn is_counting(&self) -> bool {
        self.seconds_remaining > 0
    }

    /// True from the moment a round expires until the next pick.
    pub fn is_time_up(&self) -> bool {
        self.time_up_fired && self.seconds_remaining == 0
    }
}

/// Format seconds as `M:SS`, the clock display used everywhere.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
