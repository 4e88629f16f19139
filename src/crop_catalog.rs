use serde::Serialize;

/// Label returned for any class id outside the catalog
pub const UNKNOWN_CROP: &str = "Unknown Crop";

/// Class id to crop name, in the order the classifier was trained with
pub const CROP_CATALOG: [(i64, &str); 22] = [
    (1, "Rice"),
    (2, "Maize"),
    (3, "Chickpea"),
    (4, "Kidneybeans"),
    (5, "Pigeonpeas"),
    (6, "Mothbeans"),
    (7, "Mungbean"),
    (8, "Blackgram"),
    (9, "Lentil"),
    (10, "Pomegranate"),
    (11, "Banana"),
    (12, "Mango"),
    (13, "Grapes"),
    (14, "Watermelon"),
    (15, "Muskmelon"),
    (16, "Apple"),
    (17, "Orange"),
    (18, "Papaya"),
    (19, "Coconut"),
    (20, "Cotton"),
    (21, "Jute"),
    (22, "Coffee"),
];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: &'static str,
}

/// Look up the crop name for a class id, falling back to [`UNKNOWN_CROP`]
pub fn crop_name(class_id: i64) -> &'static str {
    CROP_CATALOG
        .iter()
        .find(|(id, _)| *id == class_id)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_CROP)
}

pub fn entries() -> Vec<CatalogEntry> {
    CROP_CATALOG
        .iter()
        .map(|(id, name)| CatalogEntry { id: *id, name })
        .collect()
}
