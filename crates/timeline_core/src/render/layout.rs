//! Box layout of the grouped timeline.
//!
//! Produces element bounding boxes and flat fill operations in page
//! coordinates. The export step rasterizes a subtree of it by element id.
//! Text is approximated by bars whose width follows the character count.

use crate::timeline::group::TimelineGroup;
use std::collections::BTreeMap;

/// Element id of the whole timeline block.
pub const ROOT_ELEMENT_ID: &str = "timeline";

pub type Rgba = [u8; 4];

const ORIGIN_X: u32 = 24;
const ORIGIN_Y: u32 = 96;
const TIMELINE_WIDTH: u32 = 768;
const GROUP_GAP: u32 = 24;
const HEADER_HEIGHT: u32 = 56;
const ROW_HEIGHT: u32 = 64;
const INSET: u32 = 16;
const HEADER_TEXT_HEIGHT: u32 = 20;
const HEADER_CHAR_WIDTH: u32 = 20;
const COUNT_CHAR_WIDTH: u32 = 10;
const LABEL_TEXT_HEIGHT: u32 = 14;
const LABEL_CHAR_WIDTH: u32 = 14;
const NOTE_WIDTH: u32 = 256;
const NOTE_STRIPE_WIDTH: u32 = 4;
const NOTE_TEXT_HEIGHT: u32 = 10;
const NOTE_CHAR_WIDTH: u32 = 9;

pub const HEADER_COLOR: Rgba = [0x25, 0x63, 0xeb, 0xff];
pub const CARD_COLOR: Rgba = [0xee, 0xf2, 0xff, 0xff];
pub const DIVIDER_COLOR: Rgba = [0xdb, 0xea, 0xfe, 0xff];
pub const HEADER_TEXT_COLOR: Rgba = [0xff, 0xff, 0xff, 0xff];
pub const COUNT_TEXT_COLOR: Rgba = [0xbf, 0xdb, 0xfe, 0xff];
pub const LABEL_COLOR: Rgba = [0x1f, 0x29, 0x37, 0xff];
pub const NOTE_BACKGROUND: Rgba = [0xff, 0xff, 0xff, 0xff];
pub const NOTE_STRIPE_COLOR: Rgba = [0xfb, 0xbf, 0x24, 0xff];
pub const NOTE_TEXT_COLOR: Rgba = [0x37, 0x41, 0x51, 0xff];
pub const NO_NOTE_COLOR: Rgba = [0x9c, 0xa3, 0xaf, 0xff];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Overlapping area, or `None` when the rectangles do not touch.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > x && bottom > y).then(|| Rect::new(x, y, right - x, bottom - y))
    }
}

/// One opaque fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintOp {
    pub rect: Rect,
    pub color: Rgba,
}

/// Laid-out timeline: named element boxes plus paint operations in
/// back-to-front order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    elements: BTreeMap<String, Rect>,
    ops: Vec<PaintOp>,
}

impl RenderedView {
    pub fn element(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).copied()
    }

    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    fn fill(&mut self, rect: Rect, color: Rgba) {
        if rect.width > 0 && rect.height > 0 {
            self.ops.push(PaintOp { rect, color });
        }
    }
}

/// Lays out `groups` as stacked cards: a header per group, a row per event.
///
/// The root element is only present when there is at least one group.
pub fn layout_timeline(groups: &[TimelineGroup]) -> RenderedView {
    let mut view = RenderedView::default();
    if groups.is_empty() {
        return view;
    }

    let x = ORIGIN_X;
    let mut y = ORIGIN_Y;
    for (index, group) in groups.iter().enumerate() {
        let rows = u32::try_from(group.len()).unwrap_or(u32::MAX);
        let card = Rect::new(
            x,
            y,
            TIMELINE_WIDTH,
            HEADER_HEIGHT.saturating_add(ROW_HEIGHT.saturating_mul(rows)),
        );
        view.elements.insert(format!("group-{index}"), card);
        view.fill(card, CARD_COLOR);
        paint_header(&mut view, group, Rect::new(x, y, TIMELINE_WIDTH, HEADER_HEIGHT));

        let mut row_y = y + HEADER_HEIGHT;
        for (row_index, event) in group.events.iter().enumerate() {
            let row = Rect::new(x, row_y, TIMELINE_WIDTH, ROW_HEIGHT);
            if let Some(id) = event.id {
                view.elements.insert(format!("event-{id}"), row);
            }
            if row_index > 0 {
                view.fill(Rect::new(x, row_y, TIMELINE_WIDTH, 1), DIVIDER_COLOR);
            }
            paint_row(&mut view, &event.label, event.note.as_deref(), row);
            row_y = row_y.saturating_add(ROW_HEIGHT);
        }

        y = card.bottom().saturating_add(GROUP_GAP);
    }

    let height = y - GROUP_GAP - ORIGIN_Y;
    view.elements.insert(
        ROOT_ELEMENT_ID.to_string(),
        Rect::new(ORIGIN_X, ORIGIN_Y, TIMELINE_WIDTH, height),
    );
    view
}

fn paint_header(view: &mut RenderedView, group: &TimelineGroup, header: Rect) {
    view.fill(header, HEADER_COLOR);

    let text_y = header.y + (HEADER_HEIGHT - HEADER_TEXT_HEIGHT) / 2;
    let max_key = TIMELINE_WIDTH / 2;
    let key_width = text_width(&group.key, HEADER_CHAR_WIDTH).min(max_key);
    view.fill(
        Rect::new(header.x + INSET, text_y, key_width, HEADER_TEXT_HEIGHT),
        HEADER_TEXT_COLOR,
    );

    let count = format!("{} イベント", group.len());
    let count_width = text_width(&count, COUNT_CHAR_WIDTH);
    view.fill(
        Rect::new(
            header.right() - INSET - count_width,
            text_y + 4,
            count_width,
            HEADER_TEXT_HEIGHT - 8,
        ),
        COUNT_TEXT_COLOR,
    );
}

fn paint_row(view: &mut RenderedView, label: &str, note: Option<&str>, row: Rect) {
    let max_label = TIMELINE_WIDTH - NOTE_WIDTH - INSET * 3;
    view.fill(
        Rect::new(
            row.x + INSET,
            row.y + INSET,
            text_width(label, LABEL_CHAR_WIDTH).min(max_label),
            LABEL_TEXT_HEIGHT,
        ),
        LABEL_COLOR,
    );

    let note_box = Rect::new(
        row.right() - INSET - NOTE_WIDTH,
        row.y + 8,
        NOTE_WIDTH,
        ROW_HEIGHT - 16,
    );
    let text_x = note_box.x + NOTE_STRIPE_WIDTH + 8;
    let max_note = note_box.right() - 8 - text_x;
    match note {
        Some(note) => {
            view.fill(note_box, NOTE_BACKGROUND);
            view.fill(
                Rect::new(note_box.x, note_box.y, NOTE_STRIPE_WIDTH, note_box.height),
                NOTE_STRIPE_COLOR,
            );
            view.fill(
                Rect::new(
                    text_x,
                    note_box.y + (note_box.height - NOTE_TEXT_HEIGHT) / 2,
                    text_width(note, NOTE_CHAR_WIDTH).min(max_note),
                    NOTE_TEXT_HEIGHT,
                ),
                NOTE_TEXT_COLOR,
            );
        }
        None => view.fill(
            Rect::new(
                text_x,
                note_box.y + (note_box.height - NOTE_TEXT_HEIGHT) / 2,
                4 * NOTE_CHAR_WIDTH,
                NOTE_TEXT_HEIGHT,
            ),
            NO_NOTE_COLOR,
        ),
    }
}

fn text_width(text: &str, char_width: u32) -> u32 {
    let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    chars.saturating_mul(char_width)
}
