// SPDX-License-Identifier: MIT

//! Spare-part catalog models.

use serde::{Deserialize, Serialize};

use crate::models::review::Review;

/// A spare part as returned by the catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparePart {
    pub id: String,
    pub category: String,
    pub vehicle_type: String,
    pub brand: String,
    pub colour: Option<String>,
    pub buying_price: f64,
    pub marked_price: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub total_likes: u32,
    #[serde(default)]
    pub total_dislikes: u32,
}

/// Single-part detail response: the part plus its reviews.
#[derive(Debug, Clone, Deserialize)]
pub struct PartDetail {
    #[serde(flatten)]
    pub part: SparePart,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// One page of catalog results.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

/// Catalog sort modes understood by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartSort {
    Discount,
    PriceHigh,
    PriceLow,
    PriceMid,
    RatingHigh,
    RatingLow,
    RatingMid,
}

/// Catalog listing filters; unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PartFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<PartSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PartFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn vehicle_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = Some(vehicle_type.into());
        self
    }

    pub fn colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn sort(mut self, sort: PartSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }
}
