//! Shared scaffolding for the catalog menus: the six-row chest layout, the
//! paginated content pane, navigation button visibility, and the cyclic
//! filter rotation both systems use.
//!
//! Filter state is immutable per menu instance; every filter change builds a
//! brand-new menu from registry contents. Only the page number mutates in
//! place.

use crate::core::item_builder::StackBuilder;
use crate::host::stack::{ItemStack, Material};
use crate::host::types::ClickType;

/// Menu dimensions: a six-row chest with a one-slot border.
pub const MENU_ROWS: usize = 6;
pub const MENU_COLS: usize = 9;
pub const MENU_SLOTS: usize = MENU_ROWS * MENU_COLS;

/// Content pane: rows 1..=4, columns 1..=7.
pub const PAGE_SIZE: usize = 28;

/// Fixed button slots (row * 9 + column).
pub const SLOT_INFO: usize = 4;
pub const SLOT_PREVIOUS: usize = 45;
pub const SLOT_SEARCH: usize = 47;
pub const SLOT_SORT: usize = 48;
pub const SLOT_CLOSE: usize = 49;
pub const SLOT_TYPE: usize = 50;
pub const SLOT_RARITY: usize = 51;
pub const SLOT_NEXT: usize = 53;

/// Menu slot index of content entry `i` (0..PAGE_SIZE).
pub fn content_slot(i: usize) -> usize {
    let row = 1 + i / 7;
    let col = 1 + i % 7;
    row * MENU_COLS + col
}

/// Content entry index for a menu slot, if the slot is inside the pane.
pub fn content_index(slot: usize) -> Option<usize> {
    let row = slot / MENU_COLS;
    let col = slot % MENU_COLS;
    if (1..=4).contains(&row) && (1..=7).contains(&col) {
        Some((row - 1) * 7 + (col - 1))
    } else {
        None
    }
}

/// Number of pages needed for `total` entries; an empty catalog still has
/// one (empty) page.
pub fn page_count(total: usize) -> usize {
    if total == 0 {
        1
    } else {
        total.div_ceil(PAGE_SIZE)
    }
}

/// A value usable as a menu filter: a fixed value list plus a display label.
pub trait FilterValue: Copy + PartialEq + 'static {
    fn values() -> &'static [Self];
    fn label(&self) -> &'static str;
}

/// Rotate a filter through its value list, with a `None` sentinel at index
/// zero. Left click steps forward, right click backward, both wrapping, so
/// N+1 clicks in one direction return to the starting value.
pub fn cycle_filter<T: FilterValue>(current: Option<T>, click: ClickType) -> Option<T> {
    let values = T::values();
    let len = values.len() + 1;
    let index = match current {
        None => 0,
        Some(v) => 1 + values.iter().position(|x| *x == v).unwrap_or(0),
    };
    let next = if click.is_right() {
        (index + len - 1) % len
    } else {
        (index + 1) % len
    };
    if next == 0 {
        None
    } else {
        Some(values[next - 1])
    }
}

/// Lore for a filter button: the value list with the active entry marked.
pub fn filter_button_lore(active: Option<&str>, labels: &[&str]) -> Vec<String> {
    let mut lore = Vec::with_capacity(labels.len() + 4);
    lore.push(String::new());
    lore.push(if active.is_none() {
        "◆ None".to_string()
    } else {
        "◇ None".to_string()
    });
    for label in labels {
        if Some(*label) == active {
            lore.push(format!("◆ {}", label));
        } else {
            lore.push(format!("◇ {}", label));
        }
    }
    lore.push(String::new());
    lore.push("Right-Click to go backwards!".to_string());
    lore.push("Click to switch!".to_string());
    lore
}

/// Rendered form of a menu: title plus one stack per slot.
#[derive(Debug, Clone)]
pub struct MenuView {
    pub title: String,
    pub slots: Vec<Option<ItemStack>>,
}

impl MenuView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slots: vec![None; MENU_SLOTS],
        }
    }

    pub fn set(&mut self, slot: usize, stack: ItemStack) {
        if slot < self.slots.len() {
            self.slots[slot] = Some(stack);
        }
    }

    pub fn stack_at(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Fill the one-slot border with the background pane.
    pub fn apply_border(&mut self) {
        for slot in 0..MENU_SLOTS {
            let row = slot / MENU_COLS;
            let col = slot % MENU_COLS;
            if row == 0 || row == MENU_ROWS - 1 || col == 0 || col == MENU_COLS - 1 {
                self.slots[slot] = Some(background_stack());
            }
        }
    }
}

/// The blank border filler.
pub fn background_stack() -> ItemStack {
    StackBuilder::of(Material::GrayStainedGlassPane).name(" ").build()
}

/// The close button shown at the bottom center.
pub fn close_button() -> ItemStack {
    StackBuilder::of(Material::Barrier).name("Close").build()
}

/// The info sign at the top center.
pub fn info_sign(title: &str, description: &str, count: usize) -> ItemStack {
    StackBuilder::of(Material::OakSign)
        .name(title)
        .lore(vec![
            description.to_string(),
            String::new(),
            format!("Currently existing entries: {}", count),
        ])
        .build()
}

/// Navigation arrow skulls; the lore states the page the arrow leads to.
pub fn nav_previous(target_page: usize, pages: usize) -> ItemStack {
    StackBuilder::of(Material::PlayerHead)
        .skull_texture(ARROW_LEFT_TEXTURE)
        .name("← Previous Page")
        .lore(vec![format!("Page: {}/{}", target_page, pages)])
        .build()
}

pub fn nav_next(target_page: usize, pages: usize) -> ItemStack {
    StackBuilder::of(Material::PlayerHead)
        .skull_texture(ARROW_RIGHT_TEXTURE)
        .name("Next Page →")
        .lore(vec![format!("Page: {}/{}", target_page, pages)])
        .build()
}

const ARROW_LEFT_TEXTURE: &str =
    "eyJ0ZXh0dXJlcyI6eyJTS0lOIjp7InVybCI6Imh0dHA6Ly90ZXh0dXJlcy5taW5lY3JhZnQubmV0L2Fycm93X2xlZnQifX19";
const ARROW_RIGHT_TEXTURE: &str =
    "eyJ0ZXh0dXJlcyI6eyJTS0lOIjp7InVybCI6Imh0dHA6Ly90ZXh0dXJlcy5taW5lY3JhZnQubmV0L2Fycm93X3JpZ2h0In19fQ==";

/// What a click inside a menu asks the plugin loop to do.
#[derive(Debug)]
pub enum MenuAction<G> {
    /// Nothing; the click landed on the border or an empty slot.
    None,
    /// The page changed; re-render the same instance.
    Redraw,
    /// Close the menu.
    Close,
    /// Hand the clicked display stack to the viewer.
    Give(ItemStack),
    /// Open the search text prompt.
    OpenSearch,
    /// Replace the menu with a new instance carrying changed filters.
    Reopen(G),
}
