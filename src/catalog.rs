//! Static icon and placeholder-image catalogs.
//!
//! Both lists are fixed data shipped with the application. The store only
//! looks entries up by id; nothing here is ever mutated.

/// Icon used when an inventory or product icon id does not resolve.
pub const DEFAULT_ICON: &str = "package";

/// Symbolic icon ids selectable for inventories and icon-backed products.
pub const INVENTORY_ICONS: &[&str] = &[
    "warehouse",
    "store",
    "car",
    "truck",
    "home",
    "shopping-basket",
    "building",
    "factory",
    "ship",
    "plane",
    "box",
    "archive",
    "wrench",
    "hammer",
    "hard-hat",
    "package",
    "shopping-cart",
    "briefcase",
    "tractor",
    "bus",
    "bike",
    "train",
    "caravan",
    "sailboat",
    "gantt-chart-square",
    "clipboard-list",
    "folder",
    "file",
    "drill",
    "screwdriver",
    "paintbrush",
    "roller-coaster",
    "spray-can",
    "key",
    "lock",
    "unlock",
    "lightbulb",
    "battery",
    "plug",
    "cable",
];

/// A stock photo that products can reference instead of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderImage {
    pub id: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
    /// Short search hint for replacing the placeholder with a real photo.
    pub image_hint: &'static str,
}

/// Placeholder photos. The first entry doubles as the fallback for unknown ids.
pub const PLACEHOLDER_IMAGES: &[PlaceholderImage] = &[
    PlaceholderImage {
        id: "cylinder-lock",
        description: "A brass cylinder lock set",
        image_url: "https://picsum.photos/seed/cylinder-lock/400/300",
        image_hint: "cylinder lock",
    },
    PlaceholderImage {
        id: "padlock",
        description: "A medium steel padlock",
        image_url: "https://picsum.photos/seed/padlock/400/300",
        image_hint: "padlock",
    },
    PlaceholderImage {
        id: "smart-lock",
        description: "A keypad smart lock",
        image_url: "https://picsum.photos/seed/smart-lock/400/300",
        image_hint: "smart lock",
    },
    PlaceholderImage {
        id: "door-handle",
        description: "A steel door handle",
        image_url: "https://picsum.photos/seed/door-handle/400/300",
        image_hint: "door handle",
    },
    PlaceholderImage {
        id: "key-bunch",
        description: "A bunch of blank keys",
        image_url: "https://picsum.photos/seed/key-bunch/400/300",
        image_hint: "keys",
    },
    PlaceholderImage {
        id: "toolbox",
        description: "An open toolbox",
        image_url: "https://picsum.photos/seed/toolbox/400/300",
        image_hint: "toolbox",
    },
];

/// Returns `true` if `id` names an icon in [`INVENTORY_ICONS`].
pub fn icon_exists(id: &str) -> bool {
    INVENTORY_ICONS.contains(&id)
}

/// Returns `id` if it is a known icon, otherwise [`DEFAULT_ICON`].
pub fn resolve_icon(id: &str) -> &str {
    if icon_exists(id) {
        id
    } else {
        DEFAULT_ICON
    }
}

/// Look up a placeholder photo by id.
pub fn placeholder_image(id: &str) -> Option<&'static PlaceholderImage> {
    PLACEHOLDER_IMAGES.iter().find(|img| img.id == id)
}

/// The placeholder used when a library id does not resolve.
pub fn fallback_placeholder() -> &'static PlaceholderImage {
    &PLACEHOLDER_IMAGES[0]
}
