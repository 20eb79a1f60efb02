use crate::models::{EntityKind, Row};

pub const PAGE_SIZES: [usize; 3] = [5, 10, 25];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort, page and selection state of one list table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub sort_key: &'static str,
    pub direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
    pub selected: Vec<String>,
}

impl TableState {
    pub fn new(kind: EntityKind, default_page_size: usize) -> Self {
        Self {
            sort_key: kind.default_sort(),
            direction: SortDirection::Asc,
            page: 0,
            page_size: valid_page_size(default_page_size).unwrap_or(PAGE_SIZES[0]),
            selected: Vec::new(),
        }
    }

    /// Rebuilds the state from query parameters; anything unparseable keeps its default.
    pub fn from_params(
        kind: EntityKind,
        default_page_size: usize,
        sort: Option<&str>,
        order: Option<&str>,
        page: Option<&str>,
        rows: Option<&str>,
        selected: Option<&str>,
    ) -> Self {
        let mut state = Self::new(kind, default_page_size);

        if let Some(column) = sort.and_then(|s| kind.columns().iter().find(|c| c.key == s)) {
            state.sort_key = column.key;
        }
        if let Some(direction) = order.and_then(SortDirection::parse) {
            state.direction = direction;
        }
        if let Some(size) = rows.and_then(|r| r.parse().ok()).and_then(valid_page_size) {
            state.page_size = size;
        }
        if let Some(page) = page.and_then(|p| p.parse().ok()) {
            state.page = page;
        }
        if let Some(selected) = selected {
            for key in selected.split(',').filter(|k| !k.is_empty()) {
                if !state.is_selected(key) {
                    state.selected.push(key.to_string());
                }
            }
        }
        state
    }

    /// Header click: the active column flips direction, any other column becomes active ascending.
    pub fn request_sort(&mut self, key: &'static str) {
        if self.sort_key == key {
            self.direction = self.direction.flip();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Asc;
        }
    }

    pub fn set_page_size(&mut self, size: usize) {
        if let Some(size) = valid_page_size(size) {
            self.page_size = size;
            self.page = 0;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Select every fetched row, or clear the selection when everything is already selected.
    pub fn toggle_all(&mut self, rows: &[Row]) {
        if self.all_selected(rows) {
            self.selected.clear();
        } else {
            self.selected = rows.iter().map(|r| r.key.clone()).collect();
        }
    }

    pub fn toggle_row(&mut self, key: &str) {
        if self.is_selected(key) {
            self.selected.retain(|k| k != key);
        } else {
            self.selected.push(key.to_string());
        }
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.iter().any(|k| k == key)
    }

    pub fn all_selected(&self, rows: &[Row]) -> bool {
        !rows.is_empty() && rows.iter().all(|r| self.is_selected(&r.key))
    }

    /// Stable sort, so equal cells keep the order the API returned them in.
    pub fn sort(&self, rows: &mut [Row]) {
        let key = self.sort_key;
        match self.direction {
            SortDirection::Asc => rows.sort_by(|a, b| a.get(key).compare(b.get(key))),
            SortDirection::Desc => rows.sort_by(|a, b| b.get(key).compare(a.get(key))),
        }
    }

    /// Page index actually shown, clamped to the last page.
    pub fn current_page(&self, total: usize) -> usize {
        self.page.min(page_count(total, self.page_size).saturating_sub(1))
    }

    pub fn window<'a>(&self, rows: &'a [Row]) -> &'a [Row] {
        let start = self.current_page(rows.len()) * self.page_size;
        let end = (start + self.page_size).min(rows.len());
        &rows[start.min(rows.len())..end]
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("sort", self.sort_key.to_string()),
            ("order", self.direction.as_str().to_string()),
            ("page", self.page.to_string()),
            ("rows", self.page_size.to_string()),
        ];
        if !self.selected.is_empty() {
            pairs.push(("selected", self.selected.join(",")));
        }
        pairs
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

fn valid_page_size(size: usize) -> Option<usize> {
    PAGE_SIZES.contains(&size).then_some(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn billing_rows(amounts: &[(&str, i64)]) -> Vec<Row> {
        amounts
            .iter()
            .map(|(key, amount)| Row::new(*key).cell("amount", *amount).cell("user_id", *key))
            .collect()
    }

    fn keys(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn test_defaults() {
        let state = TableState::new(EntityKind::Billings, 5);
        assert_eq!(state.sort_key, "amount");
        assert_eq!(state.direction, SortDirection::Asc);
        assert_eq!(state.page, 0);
        assert_eq!(state.page_size, 5);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_header_clicks_cycle_direction() {
        let mut state = TableState::new(EntityKind::Billings, 5);
        let mut seen = vec![state.direction];
        for _ in 0..2 {
            state.request_sort("amount");
            seen.push(state.direction);
        }
        assert_eq!(seen, vec![SortDirection::Asc, SortDirection::Desc, SortDirection::Asc]);

        state.request_sort("amount");
        state.request_sort("hours");
        assert_eq!(state.sort_key, "hours");
        assert_eq!(state.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let mut rows = billing_rows(&[("a", 20), ("b", 10), ("c", 20), ("d", 10)]);
        let mut state = TableState::new(EntityKind::Billings, 5);

        state.sort(&mut rows);
        assert_eq!(keys(&rows), vec!["b", "d", "a", "c"]);

        let mut rows = billing_rows(&[("a", 20), ("b", 10), ("c", 20), ("d", 10)]);
        state.request_sort("amount");
        state.sort(&mut rows);
        assert_eq!(keys(&rows), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_dates_sort_by_instant() {
        let mut rows = vec![
            Row::new("oct").cell("end_date", Utc.with_ymd_and_hms(2024, 10, 2, 0, 0, 0).unwrap()),
            Row::new("apr").cell("end_date", Utc.with_ymd_and_hms(2024, 4, 3, 0, 0, 0).unwrap()),
            Row::new("apr-late").cell("end_date", Utc.with_ymd_and_hms(2024, 4, 3, 12, 0, 0).unwrap()),
        ];
        let state = TableState::new(EntityKind::Tasks, 5);
        assert_eq!(state.sort_key, "end_date");
        state.sort(&mut rows);
        assert_eq!(keys(&rows), vec!["apr", "apr-late", "oct"]);
    }

    #[test]
    fn test_page_count_and_last_page() {
        for size in PAGE_SIZES {
            for total in 0..60usize {
                let rows: Vec<Row> = (0..total).map(|i| Row::new(i.to_string())).collect();
                let pages = page_count(total, size);
                assert_eq!(pages, (total as f64 / size as f64).ceil() as usize);

                if total == 0 {
                    continue;
                }
                let mut state = TableState::new(EntityKind::Tasks, size);
                state.set_page(pages - 1);
                let expected = if total % size == 0 { size } else { total % size };
                assert_eq!(state.window(&rows).len(), expected, "n={} p={}", total, size);
            }
        }
    }

    #[test]
    fn test_window_slices_and_clamps() {
        let rows: Vec<Row> = (0..12).map(|i| Row::new(i.to_string())).collect();
        let mut state = TableState::new(EntityKind::Tasks, 5);
        state.set_page(1);
        assert_eq!(keys(state.window(&rows)), vec!["5", "6", "7", "8", "9"]);

        state.set_page(40);
        assert_eq!(state.current_page(rows.len()), 2);
        assert_eq!(keys(state.window(&rows)), vec!["10", "11"]);

        assert!(state.window(&[]).is_empty());
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut state = TableState::new(EntityKind::Tasks, 5);
        state.set_page(3);
        state.set_page_size(25);
        assert_eq!((state.page, state.page_size), (0, 25));

        state.set_page(2);
        state.set_page_size(7);
        assert_eq!((state.page, state.page_size), (2, 25));
    }

    #[test]
    fn test_selection() {
        let rows = billing_rows(&[("a", 1), ("b", 2), ("c", 3)]);
        let mut state = TableState::new(EntityKind::Billings, 5);

        state.toggle_row("c");
        state.toggle_row("a");
        state.toggle_row("b");
        assert_eq!(state.selected, vec!["c", "a", "b"]);
        state.toggle_row("a");
        assert_eq!(state.selected, vec!["c", "b"]);

        state.toggle_all(&rows);
        assert_eq!(state.selected, vec!["a", "b", "c"]);
        assert!(state.all_selected(&rows));
        state.toggle_all(&rows);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_select_all_covers_every_page() {
        let rows: Vec<Row> = (0..12).map(|i| Row::new(i.to_string())).collect();
        let mut state = TableState::new(EntityKind::Tasks, 5);
        state.toggle_all(&rows);
        assert_eq!(state.selected.len(), 12);
    }

    #[test]
    fn test_from_params() {
        let state = TableState::from_params(
            EntityKind::Tasks,
            5,
            Some("hours"),
            Some("desc"),
            Some("2"),
            Some("10"),
            Some("t1,t2,t1,"),
        );
        assert_eq!(state.sort_key, "hours");
        assert_eq!(state.direction, SortDirection::Desc);
        assert_eq!(state.page, 2);
        assert_eq!(state.page_size, 10);
        assert_eq!(state.selected, vec!["t1", "t2"]);

        let fallback = TableState::from_params(
            EntityKind::Tasks,
            5,
            Some("password"),
            Some("sideways"),
            Some("-1"),
            Some("11"),
            None,
        );
        assert_eq!(fallback, TableState::new(EntityKind::Tasks, 5));
    }

    #[test]
    fn test_query_pairs() {
        let mut state = TableState::new(EntityKind::Billings, 10);
        state.toggle_row("x");
        let pairs = state.query_pairs();
        assert!(pairs.contains(&("sort", "amount".to_string())));
        assert!(pairs.contains(&("rows", "10".to_string())));
        assert!(pairs.contains(&("selected", "x".to_string())));
    }
}
