//! The npc gui - an interactive way to manage and oversee all npcs at once.
//!
//! Same shape as the item gui: immutable filter state per instance, a fresh
//! instance per filter change, page number mutating in place.

use crate::core::item_builder::StackBuilder;
use crate::host::stack::{ItemStack, Material};
use crate::host::types::ClickType;
use crate::menu::{
    self, FilterValue, MenuAction, MenuView, PAGE_SIZE, SLOT_CLOSE, SLOT_NEXT, SLOT_PREVIOUS,
    SLOT_SEARCH, SLOT_SORT, SLOT_TYPE,
};
use crate::npcsystem::npc::Npc;
use crate::npcsystem::registry::NpcRegistry;
use crate::npcsystem::types::NpcType;

/// Holds all the sort filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcSort {
    Name,
    Type,
}

impl FilterValue for NpcSort {
    fn values() -> &'static [Self] {
        &[NpcSort::Name, NpcSort::Type]
    }

    fn label(&self) -> &'static str {
        match self {
            NpcSort::Name => "Name",
            NpcSort::Type => "Type",
        }
    }
}

pub struct NpcGui {
    search_filter: Option<String>,
    sort_filter: Option<NpcSort>,
    type_filter: Option<NpcType>,
    entries: Vec<ItemStack>,
    total: usize,
    page: usize,
}

impl NpcGui {
    /// Construct an unfiltered gui over the registry.
    pub fn new(registry: &NpcRegistry) -> Self {
        Self::with_filters(registry, None, None, None)
    }

    fn with_filters(
        registry: &NpcRegistry,
        search_filter: Option<String>,
        sort_filter: Option<NpcSort>,
        type_filter: Option<NpcType>,
    ) -> Self {
        let entries =
            Self::filtered_stacks(registry, search_filter.as_deref(), sort_filter, type_filter);
        Self {
            search_filter,
            sort_filter,
            type_filter,
            entries,
            total: registry.len(),
            page: 0,
        }
    }

    fn filtered_stacks(
        registry: &NpcRegistry,
        search: Option<&str>,
        sort: Option<NpcSort>,
        type_filter: Option<NpcType>,
    ) -> Vec<ItemStack> {
        let mut npcs: Vec<&Npc> = registry.npcs().collect();
        if let Some(needle) = search {
            let needle = needle.to_lowercase();
            npcs.retain(|npc| {
                crate::core::text::strip_tags(npc.name())
                    .to_lowercase()
                    .contains(&needle)
            });
        }
        if let Some(wanted) = type_filter {
            npcs.retain(|npc| npc.npc_type() == wanted);
        }
        match sort {
            Some(NpcSort::Name) => {
                npcs.sort_by_key(|npc| crate::core::text::strip_tags(npc.name()))
            }
            Some(NpcSort::Type) => npcs.sort_by_key(|npc| npc.npc_type()),
            None => {}
        }
        npcs.into_iter().map(Self::display_stack).collect()
    }

    /// The head stack representing an npc inside the menu.
    fn display_stack(npc: &Npc) -> ItemStack {
        let location = npc.location();
        StackBuilder::of(Material::PlayerHead)
            .skull_texture(npc.texture_value())
            .name(npc.name())
            .lore(vec![
                npc.title().to_string(),
                String::new(),
                npc.npc_type().name().to_string(),
                format!(
                    "{}: {:.1}, {:.1}, {:.1}",
                    location.world, location.x, location.y, location.z
                ),
            ])
            .data_str("skylands:id", npc.id())
            .build()
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
        let mut view = MenuView::new("Npcs Menu");
        view.apply_border();

        let start = self.page * PAGE_SIZE;
        for (i, stack) in self.entries.iter().skip(start).take(PAGE_SIZE).enumerate() {
            view.set(menu::content_slot(i), stack.clone());
        }

        view.set(
            menu::SLOT_INFO,
            menu::info_sign("Npcs Menu", "A database of every single existing npc.", self.total),
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
        registry: &NpcRegistry,
        slot: usize,
        click: ClickType,
    ) -> MenuAction<NpcGui> {
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
            )),
            SLOT_TYPE => MenuAction::Reopen(Self::with_filters(
                registry,
                self.search_filter.clone(),
                self.sort_filter,
                menu::cycle_filter(self.type_filter, click),
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
    pub fn apply_search(&self, registry: &NpcRegistry, text: String) -> NpcGui {
        Self::with_filters(registry, Some(text), self.sort_filter, self.type_filter)
    }

    pub fn type_filter(&self) -> Option<NpcType> {
        self.type_filter
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::types::Location;

    fn registry_with(entries: &[(&str, NpcType, &str)]) -> NpcRegistry {
        let mut registry = NpcRegistry::new();
        for (id, npc_type, name) in entries {
            registry.register_npc(Npc::new(
                *id,
                *npc_type,
                *name,
                Location::new("hub", 1.0, 64.0, 2.0),
            ));
        }
        registry
    }

    #[test]
    fn type_filter_narrows_entries() {
        let registry = registry_with(&[
            ("guide1", NpcType::QuestGiver, "Guide"),
            ("shop1", NpcType::Merchant, "Shopkeeper"),
        ]);
        let mut gui = NpcGui::new(&registry);
        assert_eq!(gui.entry_count(), 2);

        let gui = match gui.handle_click(&registry, SLOT_TYPE, ClickType::Left) {
            MenuAction::Reopen(g) => g,
            _ => panic!("expected reopen"),
        };
        assert_eq!(gui.type_filter(), Some(NpcType::QuestGiver));
        assert_eq!(gui.entry_count(), 1);
    }

    #[test]
    fn rotation_through_all_types_returns_to_none() {
        let registry = registry_with(&[("guide1", NpcType::QuestGiver, "Guide")]);
        let mut gui = NpcGui::new(&registry);
        for _ in 0..NpcType::ALL.len() + 1 {
            gui = match gui.handle_click(&registry, SLOT_TYPE, ClickType::Left) {
                MenuAction::Reopen(g) => g,
                _ => panic!("expected reopen"),
            };
        }
        assert_eq!(gui.type_filter(), None);
    }

    #[test]
    fn entries_render_name_title_and_location() {
        let registry = registry_with(&[("guide1", NpcType::QuestGiver, "Guide")]);
        let gui = NpcGui::new(&registry);
        let view = gui.view();
        let head = view.stack_at(menu::content_slot(0)).expect("entry");
        assert_eq!(head.material, Material::PlayerHead);
        assert_eq!(head.display_name.as_deref(), Some("Guide"));
        assert!(head.lore.iter().any(|l| l.contains("Quest Giver")));
        assert!(head.lore.iter().any(|l| l.starts_with("hub:")));
    }

    #[test]
    fn search_matches_visible_name() {
        let registry = registry_with(&[
            ("guide1", NpcType::QuestGiver, "<b>Guide</b>"),
            ("shop1", NpcType::Merchant, "Shopkeeper"),
        ]);
        let gui = NpcGui::new(&registry);
        let searched = gui.apply_search(&registry, "guide".to_string());
        assert_eq!(searched.entry_count(), 1);
    }
}
