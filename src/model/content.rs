//! Album data and the state of the results grid

use ratatui::layout::Rect;

pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 6;

/// First artist hit for a query
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub followers: u32,
}

/// An album as listed for an artist
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub image_url: Option<String>,
    pub external_url: Option<String>,
}

/// Responsive card grid laid over the results viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub area: Rect,
    pub columns: u16,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

impl GridGeometry {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            columns: (area.width / CARD_WIDTH).max(1),
        }
    }

    /// Cards stretch to share the full width between columns
    pub fn card_width(&self) -> u16 {
        (self.area.width / self.columns).max(1)
    }

    pub fn rows(&self, count: usize) -> usize {
        count.div_ceil(self.columns as usize)
    }

    pub fn content_height(&self, count: usize) -> u16 {
        (self.rows(count) as u16).saturating_mul(CARD_HEIGHT)
    }

    pub fn max_offset(&self, count: usize) -> u16 {
        self.content_height(count).saturating_sub(self.area.height)
    }

    /// Screen rect of a card at the given scroll offset, clipped to the viewport
    pub fn card_rect(&self, index: usize, offset: u16) -> Option<Rect> {
        let columns = self.columns as usize;
        let row = (index / columns) as i32;
        let col = (index % columns) as u16;

        let top = self.area.y as i32 + row * CARD_HEIGHT as i32 - offset as i32;
        let bottom = top + CARD_HEIGHT as i32;
        let view_top = self.area.y as i32;
        let view_bottom = view_top + self.area.height as i32;

        let clipped_top = top.max(view_top);
        let clipped_bottom = bottom.min(view_bottom);
        if clipped_top >= clipped_bottom {
            return None;
        }

        Some(Rect {
            x: self.area.x + col * self.card_width(),
            y: clipped_top as u16,
            width: self.card_width(),
            height: (clipped_bottom - clipped_top) as u16,
        })
    }

    /// Index of the card under a screen position
    pub fn card_at(&self, x: u16, y: u16, offset: u16, count: usize) -> Option<usize> {
        let inside = x >= self.area.x
            && x < self.area.x + self.area.width
            && y >= self.area.y
            && y < self.area.y + self.area.height;
        if !inside {
            return None;
        }

        let col = (x - self.area.x) / self.card_width();
        if col >= self.columns {
            return None;
        }
        let row = (y - self.area.y + offset) / CARD_HEIGHT;
        let index = row as usize * self.columns as usize + col as usize;
        (index < count).then_some(index)
    }

    /// Smallest change to `offset` that brings the card fully into view
    pub fn offset_to_show(&self, index: usize, offset: u16) -> u16 {
        let top = (index / self.columns as usize) as u16 * CARD_HEIGHT;
        let bottom = top + CARD_HEIGHT;
        if top < offset {
            top
        } else if bottom > offset + self.area.height {
            bottom.saturating_sub(self.area.height)
        } else {
            offset
        }
    }
}

/// State for the results area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub albums: Vec<Album>,
    pub artist: Option<Artist>,
    pub selected: usize,
    /// Card under the pointer or keyboard cursor
    pub hovered: Option<usize>,
    pub scroll_offset: u16,
    pub grid: GridGeometry,
    /// Sequence number of the most recently submitted search
    pub latest_search: u64,
}

impl ContentState {
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn max_offset(&self) -> u16 {
        self.grid.max_offset(self.albums.len())
    }

    pub fn selected_album(&self) -> Option<&Album> {
        self.albums.get(self.selected)
    }
}
