//! The item gui - an interactive way to manage and oversee all items at once.
//!
//! Filter state (search, sort, type, rarity) is fixed at construction; every
//! filter change builds a brand-new gui from registry contents. Only the page
//! number mutates in place.

use crate::core::item_builder::StackBuilder;
use crate::host::stack::{ItemStack, Material};
use crate::host::types::ClickType;
use crate::itemsystem::item::Item;
use crate::itemsystem::registry::ItemRegistry;
use crate::itemsystem::types::{ItemType, Rarity};
use crate::menu::{
    self, FilterValue, MenuAction, MenuView, PAGE_SIZE, SLOT_CLOSE, SLOT_NEXT, SLOT_PREVIOUS,
    SLOT_RARITY, SLOT_SEARCH, SLOT_SORT, SLOT_TYPE,
};

/// Holds all the sort filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSort {
    Name,
    Rarity,
    Type,
}

impl FilterValue for ItemSort {
    fn values() -> &'static [Self] {
        &[ItemSort::Name, ItemSort::Rarity, ItemSort::Type]
    }

    fn label(&self) -> &'static str {
        match self {
            ItemSort::Name => "Name",
            ItemSort::Rarity => "Rarity",
            ItemSort::Type => "Type",
        }
    }
}

pub struct ItemGui {
    search_filter: Option<String>,
    sort_filter: Option<ItemSort>,
    type_filter: Option<ItemType>,
    rarity_filter: Option<Rarity>,
    entries: Vec<ItemStack>,
    total: usize,
    page: usize,
}

impl ItemGui {
    /// Construct an unfiltered gui over the registry.
    pub fn new(registry: &ItemRegistry) -> Self {
        Self::with_filters(registry, None, None, None, None)
    }

    /// Construct a gui with the given filter set. Internal: filter changes go
    /// through clicks on an existing gui.
    fn with_filters(
        registry: &ItemRegistry,
        search_filter: Option<String>,
        sort_filter: Option<ItemSort>,
        type_filter: Option<ItemType>,
        rarity_filter: Option<Rarity>,
    ) -> Self {
        let entries = Self::filtered_stacks(
            registry,
            search_filter.as_deref(),
            sort_filter,
            type_filter,
            rarity_filter,
        );
        Self {
            search_filter,
            sort_filter,
            type_filter,
            rarity_filter,
            entries,
            total: registry.len(),
            page: 0,
        }
    }

    /// Filter and sort the registry's items, then map to display stacks.
    fn filtered_stacks(
        registry: &ItemRegistry,
        search: Option<&str>,
        sort: Option<ItemSort>,
        type_filter: Option<ItemType>,
        rarity_filter: Option<Rarity>,
    ) -> Vec<ItemStack> {
        let mut items: Vec<&Item> = registry.items().collect();
        if let Some(needle) = search {
            let needle = needle.to_lowercase();
            items.retain(|item| item.display_name().to_lowercase().contains(&needle));
        }
        if let Some(wanted) = type_filter {
            items.retain(|item| item.item_type() == wanted);
        }
        if let Some(wanted) = rarity_filter {
            items.retain(|item| item.rarity() == wanted);
        }
        match sort {
            Some(ItemSort::Name) => items.sort_by_key(|item| item.display_name()),
            Some(ItemSort::Rarity) => items.sort_by_key(|item| item.rarity().weight()),
            Some(ItemSort::Type) => items.sort_by_key(|item| item.item_type()),
            None => {}
        }
        items.into_iter().map(Item::build_stack).collect()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn pages(&self) -> usize {
        menu::page_count(self.entries.len())
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Render the current page.
    pub fn view(&self) -> MenuView {
        let mut view = MenuView::new("Items Menu");
        view.apply_border();

        let start = self.page * PAGE_SIZE;
        for (i, stack) in self.entries.iter().skip(start).take(PAGE_SIZE).enumerate() {
            view.set(menu::content_slot(i), stack.clone());
        }

        view.set(
            menu::SLOT_INFO,
            menu::info_sign(
                "Items Menu",
                "A database of every single existing item.",
                self.total,
            ),
        );
        view.set(SLOT_CLOSE, menu::close_button());

        if self.page > 0 {
            view.set(SLOT_PREVIOUS, menu::nav_previous(self.page, self.pages()));
        }
        if self.page + 1 < self.pages() {
            view.set(SLOT_NEXT, menu::nav_next(self.page + 2, self.pages()));
        }

        view.set(SLOT_SEARCH, self.search_button());
        view.set(
            SLOT_SORT,
            filter_button(Material::Hopper, "Sort", self.sort_filter),
        );
        view.set(
            SLOT_TYPE,
            filter_button(Material::ArmorStand, "Type", self.type_filter),
        );
        view.set(
            SLOT_RARITY,
            filter_button(Material::EnderEye, "Rarity", self.rarity_filter),
        );
        view
    }

    fn search_button(&self) -> ItemStack {
        let lore = match &self.search_filter {
            None => vec![String::new(), "Click to search!".to_string()],
            Some(filter) => vec![
                String::new(),
                format!("Filter: {}", filter),
                String::new(),
                "Right-Click to clear!".to_string(),
                "Click to edit filter!".to_string(),
            ],
        };
        StackBuilder::of(Material::WritableBook)
            .name("Search")
            .lore(lore)
            .build()
    }

    /// React to a click inside the menu.
    pub fn handle_click(
        &mut self,
        registry: &ItemRegistry,
        slot: usize,
        click: ClickType,
    ) -> MenuAction<ItemGui> {
        match slot {
            SLOT_CLOSE => MenuAction::Close,
            SLOT_PREVIOUS if self.page > 0 => {
                self.page -= 1;
                MenuAction::Redraw
            }
            SLOT_NEXT if self.page + 1 < self.pages() => {
                self.page += 1;
                MenuAction::Redraw
            }
            SLOT_SEARCH => {
                if click.is_right() && self.search_filter.is_some() {
                    MenuAction::Reopen(Self::with_filters(
                        registry,
                        None,
                        self.sort_filter,
                        self.type_filter,
                        self.rarity_filter,
                    ))
                } else {
                    MenuAction::OpenSearch
                }
            }
            SLOT_SORT => MenuAction::Reopen(Self::with_filters(
                registry,
                self.search_filter.clone(),
                menu::cycle_filter(self.sort_filter, click),
                self.type_filter,
                self.rarity_filter,
            )),
            SLOT_TYPE => MenuAction::Reopen(Self::with_filters(
                registry,
                self.search_filter.clone(),
                self.sort_filter,
                menu::cycle_filter(self.type_filter, click),
                self.rarity_filter,
            )),
            SLOT_RARITY => MenuAction::Reopen(Self::with_filters(
                registry,
                self.search_filter.clone(),
                self.sort_filter,
                self.type_filter,
                menu::cycle_filter(self.rarity_filter, click),
            )),
            _ => match menu::content_index(slot) {
                Some(i) => {
                    let index = self.page * PAGE_SIZE + i;
                    match self.entries.get(index) {
                        Some(stack) => MenuAction::Give(stack.clone()),
                        None => MenuAction::None,
                    }
                }
                None => MenuAction::None,
            },
        }
    }

    /// Confirmed text from the search prompt: a new gui with the search
    /// filter applied.
    pub fn apply_search(&self, registry: &ItemRegistry, text: String) -> ItemGui {
        Self::with_filters(
            registry,
            Some(text),
            self.sort_filter,
            self.type_filter,
            self.rarity_filter,
        )
    }

    pub fn type_filter(&self) -> Option<ItemType> {
        self.type_filter
    }

    pub fn rarity_filter(&self) -> Option<Rarity> {
        self.rarity_filter
    }

    pub fn search_filter(&self) -> Option<&str> {
        self.search_filter.as_deref()
    }
}

fn filter_button<T: FilterValue>(material: Material, name: &str, active: Option<T>) -> ItemStack {
    let labels: Vec<&str> = T::values().iter().map(|v| v.label()).collect();
    StackBuilder::of(material)
        .name(name)
        .lore(menu::filter_button_lore(active.map(|v| v.label()), &labels))
        .build()
}
