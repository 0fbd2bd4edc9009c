//! Activity catalog: filtered/sorted view plus capacity-checked reservations

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::activity::{Activity, ActivityKind};
use crate::error::{CatalogError, ValidationError};

/// Availability constraint selected in the filter sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// No constraint
    #[default]
    Any,
    Available,
    Full,
}

impl FromStr for Availability {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "none" | "all" => Ok(Availability::Any),
            "available" => Ok(Availability::Available),
            "full" => Ok(Availability::Full),
            other => Err(ValidationError::InvalidFieldValue {
                field: "availability".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Recommended,
    RatingAscending,
    RatingDescending,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Recommended => "Recommended",
            SortKey::RatingAscending => "Rating: Low → High",
            SortKey::RatingDescending => "Rating: High → Low",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recommended" => Ok(SortKey::Recommended),
            "rating-asc" | "rating_asc" | "asc" => Ok(SortKey::RatingAscending),
            "rating-desc" | "rating_desc" | "desc" => Ok(SortKey::RatingDescending),
            other => Err(ValidationError::InvalidFieldValue {
                field: "sort".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Filters and sort order chosen by the user; starts with no filters and
/// the recommended order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub availability: Availability,
    pub min_rating: Option<f64>,
    pub kind: Option<ActivityKind>,
    pub sort: SortKey,
}

impl FilterState {
    /// Number of filter dimensions currently set (the sort key never counts)
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if self.availability != Availability::Any {
            count += 1;
        }
        if self.min_rating.is_some() {
            count += 1;
        }
        if self.kind.is_some() {
            count += 1;
        }
        count
    }

    /// Drops every filter but keeps the chosen sort order
    pub fn clear(&mut self) {
        self.availability = Availability::Any;
        self.min_rating = None;
        self.kind = None;
    }

    /// Rejects a minimum rating that no activity could ever be compared
    /// against: NaN, infinities, or anything outside 0.0..=5.0.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(min_rating) = self.min_rating {
            if !min_rating.is_finite() || !(0.0..=5.0).contains(&min_rating) {
                return Err(ValidationError::InvalidFieldValue {
                    field: "min_rating".to_string(),
                    value: min_rating.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        let spots_left = activity.spots_left();
        match self.availability {
            Availability::Available if spots_left == 0 => return false,
            Availability::Full if spots_left > 0 => return false,
            _ => {}
        }
        if let Some(min_rating) = self.min_rating {
            if activity.rating < min_rating {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if activity.kind != kind {
                return false;
            }
        }
        true
    }
}

// -0.0 and 0.0 are the same rating; `total_cmp` alone would split them
fn rating_key(rating: f64) -> f64 {
    if rating == 0.0 {
        0.0
    } else {
        rating
    }
}

fn compare(sort: SortKey, a: &Activity, b: &Activity) -> Ordering {
    let (a_rating, b_rating) = (rating_key(a.rating), rating_key(b.rating));
    match sort {
        SortKey::RatingAscending => a_rating.total_cmp(&b_rating),
        SortKey::RatingDescending => b_rating.total_cmp(&a_rating),
        SortKey::Recommended => b_rating
            .total_cmp(&a_rating)
            .then_with(|| b.spots_left().cmp(&a.spots_left())),
    }
}

/// Returns the activities that pass `filters`, ordered by its sort key.
///
/// The sort is stable, so activities that compare equal keep their input
/// order. The input slice is never modified.
pub fn list_visible(activities: &[Activity], filters: &FilterState) -> Vec<Activity> {
    let mut visible: Vec<Activity> = activities
        .iter()
        .filter(|activity| filters.matches(activity))
        .cloned()
        .collect();

    visible.sort_by(|a, b| compare(filters.sort, a, b));

    debug!(
        total = activities.len(),
        visible = visible.len(),
        active_filters = filters.active_count(),
        sort = ?filters.sort,
        "Listed visible activities"
    );

    visible
}

/// Books one seat on the activity with `id`.
///
/// This is the only place `booked` changes. A full or unknown activity
/// leaves the whole collection untouched.
pub fn reserve<'a>(activities: &'a mut [Activity], id: &str) -> Result<&'a Activity, CatalogError> {
    let activity = match activities.iter_mut().find(|activity| activity.id == id) {
        Some(activity) => activity,
        None => {
            warn!(id, "Reservation for unknown activity");
            return Err(CatalogError::NotFound(id.to_string()));
        }
    };

    if activity.spots_left() == 0 {
        warn!(id, capacity = activity.capacity, "Reservation rejected, activity is full");
        return Err(CatalogError::CapacityExceeded(id.to_string()));
    }

    activity.booked += 1;
    info!(
        id,
        booked = activity.booked,
        capacity = activity.capacity,
        "Added to plan"
    );
    Ok(activity)
}

/// In-memory catalog that exclusively owns its activities for a session
#[derive(Debug, Clone, Default)]
pub struct ActivityCatalog {
    activities: Vec<Activity>,
}

impl ActivityCatalog {
    /// Builds a catalog after checking every record and rejecting duplicate ids
    pub fn new(activities: Vec<Activity>) -> Result<Self, ValidationError> {
        {
            let mut seen = HashSet::new();
            for activity in &activities {
                activity.validate()?;
                if !seen.insert(activity.id.as_str()) {
                    return Err(ValidationError::DuplicateId(activity.id.clone()));
                }
            }
        }
        Ok(ActivityCatalog { activities })
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn visible(&self, filters: &FilterState) -> Vec<Activity> {
        list_visible(&self.activities, filters)
    }

    pub fn reserve(&mut self, id: &str) -> Result<&Activity, CatalogError> {
        reserve(&mut self.activities, id)
    }
}
