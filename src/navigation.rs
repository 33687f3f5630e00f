use log::debug;

/// Current page of a document with a fixed page count.
///
/// Pages are 1-indexed. Requests that would leave `1..=total` are refused
/// and leave the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNavigator {
    current: u32,
    total: u32,
}

impl PageNavigator {
    pub fn new(total: u32) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            debug!("Already at last page ({})", self.total);
            return false;
        }
        self.current += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            debug!("Already at first page");
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn jump_to(&mut self, page: u32) -> bool {
        if page == 0 || page > self.total {
            debug!("Ignoring jump to page {page}, valid range is 1..={}", self.total);
            return false;
        }
        self.current = page;
        true
    }

    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total).contains(&page)
    }
}
