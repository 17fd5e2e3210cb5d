use chrono::{Duration, Local, NaiveDate};

use super::RevisionCalendar;
use crate::utils::date::week_days;

impl RevisionCalendar {
    /// Shift the visible window back by exactly one week and refetch.
    pub fn previous_week(&mut self) {
        let anchor = self.week[0] - Duration::days(7);
        self.set_week_anchor(anchor);
    }

    /// Shift the visible window forward by exactly one week and refetch.
    pub fn next_week(&mut self) {
        let anchor = self.week[0] + Duration::days(7);
        self.set_week_anchor(anchor);
    }

    /// Re-anchor the window on today's week and select today.
    pub fn jump_to_today(&mut self) {
        let today = Local::now().date_naive();
        self.selected_date = today;
        self.set_week_anchor(today);
    }

    /// Change the selected day. Selection alone never refetches.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    fn set_week_anchor(&mut self, anchor: NaiveDate) {
        self.week = week_days(anchor);
        self.reload_week_events();
    }
}
