//! Product catalog data model.
//!
//! [`Product`] is a global catalog entry that any number of inventories can
//! reference. Its [`ProductImage`] keeps the persisted `{ imageUrl,
//! description, imageHint, iconId? }` shape; the photo/icon choice is read
//! back through [`ProductImage::representation`].
//!
//! Image changes arrive as an [`ImageInput`], an internally-tagged enum whose
//! `imageType` discriminant carries exactly one payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog;

/// Visual representation of a product.
///
/// Exactly one representation is populated: a non-empty `image_url` for a
/// photo, or `icon_id` with an empty `image_url` for an icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub image_url: String,
    pub description: String,
    pub image_hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_id: Option<String>,
}

/// Borrowed view of which representation a [`ProductImage`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    Photo { url: &'a str },
    Icon { icon_id: &'a str },
}

impl ProductImage {
    /// A photo-backed image (data URL or remote URL).
    pub fn photo(
        image_url: impl Into<String>,
        description: impl Into<String>,
        image_hint: impl Into<String>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            description: description.into(),
            image_hint: image_hint.into(),
            icon_id: None,
        }
    }

    /// An icon-backed image.
    pub fn icon(icon_id: &str) -> Self {
        Self {
            image_url: String::new(),
            description: format!("{icon_id} icon"),
            image_hint: "icon".to_string(),
            icon_id: Some(icon_id.to_string()),
        }
    }

    /// Build an image from a catalog placeholder photo.
    pub fn from_placeholder(img: &catalog::PlaceholderImage) -> Self {
        Self::photo(img.image_url, img.description, img.image_hint)
    }

    /// Which representation this image uses.
    ///
    /// A photo wins when `image_url` is non-empty; otherwise the icon id is
    /// used, falling back to [`catalog::DEFAULT_ICON`].
    pub fn representation(&self) -> ImageRef<'_> {
        if !self.image_url.is_empty() {
            ImageRef::Photo {
                url: &self.image_url,
            }
        } else {
            ImageRef::Icon {
                icon_id: self.icon_id.as_deref().unwrap_or(catalog::DEFAULT_ICON),
            }
        }
    }
}

/// A global catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub code: String,
    pub image: ProductImage,
    /// Unitless; the presentation layer applies the currency.
    pub purchase_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
}

/// Requested image for a new or edited product.
///
/// Serialized with an `imageType` tag next to the payload field:
/// `{ "imageType": "icon", "iconId": "key" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "imageType",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ImageInput {
    /// A user upload, already cropped and encoded as a data URL.
    Upload { uploaded_image: String },
    /// One of [`catalog::INVENTORY_ICONS`].
    Icon { icon_id: String },
    /// A [`catalog::PLACEHOLDER_IMAGES`] entry (legacy picker).
    Library { library_image_id: String },
}

impl ImageInput {
    /// Resolve the input into a stored image.
    ///
    /// Returns `None` when the payload is empty or names an unknown icon.
    /// An unknown library id resolves to the first placeholder.
    pub fn resolve(&self) -> Option<ProductImage> {
        match self {
            ImageInput::Upload { uploaded_image } if !uploaded_image.is_empty() => Some(
                ProductImage::photo(uploaded_image.as_str(), "User uploaded image", "uploaded"),
            ),
            ImageInput::Icon { icon_id } if catalog::icon_exists(icon_id) => {
                Some(ProductImage::icon(icon_id))
            }
            ImageInput::Library { library_image_id } if !library_image_id.is_empty() => {
                let img = catalog::placeholder_image(library_image_id)
                    .unwrap_or_else(catalog::fallback_placeholder);
                Some(ProductImage::from_placeholder(img))
            }
            _ => None,
        }
    }
}

/// Values for adding a new product to an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub code: String,
    pub critical_threshold: u32,
    pub purchase_price: f64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(flatten)]
    pub image: ImageInput,
    /// Initial count per location id; missing locations start at zero.
    #[serde(default)]
    pub initial_stocks: BTreeMap<String, u32>,
}

/// Values for editing an existing product within an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub name: String,
    pub code: String,
    pub critical_threshold: u32,
    pub purchase_price: f64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(flatten)]
    pub image: ImageInput,
}
