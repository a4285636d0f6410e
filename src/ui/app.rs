//! Application state management for the TUI.

use crate::catalog::Category;
use crate::session::Session;
use rand::rngs::ThreadRng;

/// Main application state: the game session plus everything that only
/// matters to the terminal front end.
pub struct App {
    /// The round state (current title, countdown, settings)
    pub session: Session,
    /// Whether the category settings popup is open
    pub show_settings: bool,
    /// Cursor row inside the settings popup
    pub settings_cursor: usize,
    /// Flash phase while an expired round is on screen
    pub flash_on: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    rng: ThreadRng,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            show_settings: false,
            settings_cursor: 0,
            flash_on: false,
            should_quit: false,
            rng: rand::thread_rng(),
        }
    }

    /// Draw a new title and restart the countdown. Returns the picked title,
    /// or `None` when nothing is eligible (state untouched). A pick also
    /// cancels any running flash from the previous round.
    pub fn pick(&mut self) -> Option<String> {
        let picked = self
            .session
            .pick_random(&mut self.rng)
            .map(|item| item.title.clone());
        if picked.is_some() {
            self.flash_on = false;
        }
        picked
    }

    /// Advance the countdown. Returns `true` when this tick expired the
    /// round.
    pub fn on_tick(&mut self) -> bool {
        self.session.tick()
    }

    /// Alternate the flash phase; driven by the event loop while the expired
    /// round is still on screen.
    pub fn toggle_flash(&mut self) {
        self.flash_on = !self.flash_on;
    }

    pub fn open_settings(&mut self) {
        self.show_settings = true;
    }

    pub fn close_settings(&mut self) {
        self.show_settings = false;
    }

    /// Move the settings cursor up, wrapping at the top.
    pub fn settings_up(&mut self) {
        let len = Category::ALL.len();
        self.settings_cursor = (self.settings_cursor + len - 1) % len;
    }

    /// Move the settings cursor down, wrapping at the bottom.
    pub fn settings_down(&mut self) {
        self.settings_cursor = (self.settings_cursor + 1) % Category::ALL.len();
    }

    /// The category under the settings cursor.
    pub fn selected_category(&self) -> Category {
        Category::ALL[self.settings_cursor]
    }

    /// Toggle the category under the settings cursor.
    pub fn toggle_selected_category(&mut self) {
        let category = self.selected_category();
        self.session.toggle_category(category);
    }

    /// Adjust the round length by whole minutes.
    pub fn adjust_timer(&mut self, delta_minutes: i32) {
        self.session.adjust_timer(delta_minutes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Item};

    fn app() -> App {
        App::new(Session::new(Catalog::new(vec![Item::new(
            "A",
            Category::Movies,
        )])))
    }

    #[test]
    fn test_settings_cursor_wraps() {
        let mut app = app();
        assert_eq!(app.selected_category(), Category::Movies);

        app.settings_up();
        assert_eq!(app.selected_category(), Category::Series);

        app.settings_down();
        assert_eq!(app.selected_category(), Category::Movies);

        for _ in 0..Category::ALL.len() {
            app.settings_down();
        }
        assert_eq!(app.selected_category(), Category::Movies);
    }

    #[test]
    fn test_toggle_selected_category() {
        let mut app = app();
        assert!(app.session.settings().is_enabled(Category::Movies));

        app.toggle_selected_category();
        assert!(!app.session.settings().is_enabled(Category::Movies));

        app.toggle_selected_category();
        assert!(app.session.settings().is_enabled(Category::Movies));
    }

    #[test]
    fn test_pick_cancels_flash() {
        let mut app = app();
        app.flash_on = true;

        assert_eq!(app.pick().as_deref(), Some("A"));
        assert!(!app.flash_on);
    }

    #[test]
    fn test_pick_with_nothing_eligible_keeps_flash() {
        let mut app = app();
        app.session.toggle_category(Category::Movies);
        app.flash_on = true;

        assert!(app.pick().is_none());
        assert!(app.flash_on);
    }
}
