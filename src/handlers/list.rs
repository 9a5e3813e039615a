//! List handler

use crate::Session;
use crate::formatting;
use crate::todo::{Filter, local_date_today};

impl Session {
    /// Render the filtered listing split into overdue, today, upcoming and the rest
    pub fn handle_list(&self, filter: &Filter, sort_by_group: bool) -> String {
        let buckets = self.data.listing(filter, local_date_today(), sort_by_group);
        formatting::format_listing(&buckets)
    }
}
