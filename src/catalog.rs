use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::{Dish, DishSearchRequest, Restaurant, RestaurantSummary};

/// Catalog construction failures. Both are fatal at startup: the server must
/// not accept traffic without a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog file not found: {0}")]
    Missing(PathBuf),
    #[error("malformed record in {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Deserialize)]
struct DishRow {
    dish_id: String,
    restaurant_id: String,
    dish_name: String,
    price: f64,
    prep_time_min: u32,
    tags: String,
    popularity_score: f64,
}

#[derive(Debug, Deserialize)]
struct RestaurantRow {
    restaurant_id: String,
    name: String,
    cuisine_type: String,
    city: String,
    zip_code: String,
    avg_rating: f64,
    delivery_eta: u32,
    price_min: f64,
    price_max: f64,
}

/// Read-only dish and restaurant catalog, built once at startup and shared
/// without locking. Point lookups go through id indexes; search and listing
/// iterate in load order.
#[derive(Debug)]
pub struct Catalog {
    dishes: Vec<Dish>,
    dish_index: HashMap<String, usize>,
    restaurants: Vec<Restaurant>,
    restaurant_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(dishes: Vec<Dish>, restaurants: Vec<Restaurant>) -> Self {
        let dish_index = dishes
            .iter()
            .enumerate()
            .map(|(i, d)| (d.dish_id.clone(), i))
            .collect();
        let restaurant_index = restaurants
            .iter()
            .enumerate()
            .map(|(i, r)| (r.restaurant_id.clone(), i))
            .collect();
        Self {
            dishes,
            dish_index,
            restaurants,
            restaurant_index,
        }
    }

    /// Loads `restaurants.csv` and `dishes.csv` from the data directory.
    pub fn load(data_dir: &Path) -> Result<Self, CatalogError> {
        let restaurants = read_rows::<RestaurantRow>(&data_dir.join("restaurants.csv"))?
            .into_iter()
            .map(|row| Restaurant {
                restaurant_id: row.restaurant_id,
                name: row.name,
                cuisine_type: row.cuisine_type,
                city: row.city,
                zip_code: row.zip_code,
                avg_rating: row.avg_rating,
                delivery_eta: row.delivery_eta,
                price_min: row.price_min,
                price_max: row.price_max,
            })
            .collect();

        let dishes = read_rows::<DishRow>(&data_dir.join("dishes.csv"))?
            .into_iter()
            .map(|row| {
                // Tags arrive as one comma-separated, possibly quoted field.
                let tags = row
                    .tags
                    .trim_matches(|c| c == '"' || c == '\'')
                    .split(',')
                    .map(|tag| tag.trim().to_lowercase())
                    .filter(|tag| !tag.is_empty())
                    .collect();
                Dish {
                    dish_id: row.dish_id,
                    restaurant_id: row.restaurant_id,
                    dish_name: row.dish_name,
                    price: row.price,
                    prep_time_min: row.prep_time_min,
                    tags,
                    popularity_score: row.popularity_score,
                }
            })
            .collect();

        Ok(Self::new(dishes, restaurants))
    }

    pub fn dish(&self, dish_id: &str) -> Option<&Dish> {
        self.dish_index.get(dish_id).map(|&i| &self.dishes[i])
    }

    pub fn restaurant(&self, restaurant_id: &str) -> Option<&Restaurant> {
        self.restaurant_index
            .get(restaurant_id)
            .map(|&i| &self.restaurants[i])
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Listing entries with per-restaurant dish counts, computed on demand.
    pub fn restaurant_summaries(&self) -> Vec<RestaurantSummary> {
        self.restaurants
            .iter()
            .map(|restaurant| {
                let dish_count = self
                    .dishes
                    .iter()
                    .filter(|d| d.restaurant_id == restaurant.restaurant_id)
                    .count();
                RestaurantSummary {
                    restaurant_id: restaurant.restaurant_id.clone(),
                    restaurant_name: restaurant.name.clone(),
                    cuisine_type: restaurant.cuisine_type.clone(),
                    city: restaurant.city.clone(),
                    avg_rating: restaurant.avg_rating,
                    dish_count,
                }
            })
            .collect()
    }

    /// Conjunction of the supplied predicates; omitted predicates are not
    /// applied. Results keep the catalog's load order.
    pub fn search(&self, filter: &DishSearchRequest) -> Vec<Dish> {
        let name = filter.dish_name.as_ref().map(|n| n.to_lowercase());
        let tags: Option<Vec<String>> = filter
            .tags
            .as_ref()
            .map(|tags| tags.iter().map(|t| t.to_lowercase()).collect());

        self.dishes
            .iter()
            .filter(|dish| {
                if let Some(name) = &name {
                    if !dish.dish_name.to_lowercase().contains(name.as_str()) {
                        return false;
                    }
                }
                if let Some(restaurant_id) = &filter.restaurant_id {
                    if &dish.restaurant_id != restaurant_id {
                        return false;
                    }
                }
                if let Some(tags) = &tags {
                    // Any supplied tag may match any dish tag.
                    let matched = tags
                        .iter()
                        .any(|t| dish.tags.iter().any(|dt| dt.to_lowercase() == *t));
                    if !matched {
                        return false;
                    }
                }
                if let Some(max_price) = filter.max_price {
                    if dish.price > max_price {
                        return false;
                    }
                }
                if let Some(min_popularity) = filter.min_popularity_score {
                    if dish.popularity_score < min_popularity {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::Missing(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path).map_err(|source| CatalogError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    reader
        .deserialize()
        .map(|row| {
            row.map_err(|source| CatalogError::Malformed {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: &str, restaurant: &str, name: &str, price: f64, tags: &[&str], score: f64) -> Dish {
        Dish {
            dish_id: id.to_string(),
            restaurant_id: restaurant.to_string(),
            dish_name: name.to_string(),
            price,
            prep_time_min: 15,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            popularity_score: score,
        }
    }

    fn restaurant(id: &str, name: &str) -> Restaurant {
        Restaurant {
            restaurant_id: id.to_string(),
            name: name.to_string(),
            cuisine_type: "italian".to_string(),
            city: "Berlin".to_string(),
            zip_code: "10115".to_string(),
            avg_rating: 4.4,
            delivery_eta: 30,
            price_min: 5.0,
            price_max: 25.0,
        }
    }

    fn fixture() -> Catalog {
        Catalog::new(
            vec![
                dish("d1", "r1", "Margherita Pizza", 12.5, &["vegetarian"], 0.9),
                dish("d2", "r1", "Spicy Chicken Pizza", 16.0, &["spicy"], 0.7),
                dish("d3", "r2", "Chicken Curry", 11.0, &["spicy", "gluten-free"], 0.8),
                dish("d4", "r2", "Vegan Bowl", 9.5, &["vegan"], 0.6),
            ],
            vec![restaurant("r1", "Pizza Palace"), restaurant("r2", "Curry Corner")],
        )
    }

    #[test]
    fn empty_filter_returns_full_catalog_in_load_order() {
        let catalog = fixture();
        let results = catalog.search(&DishSearchRequest::default());
        let ids: Vec<&str> = results.iter().map(|d| d.dish_id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3", "d4"]);
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let catalog = fixture();
        let results = catalog.search(&DishSearchRequest {
            dish_name: Some("CHICKEN".to_string()),
            ..Default::default()
        });
        let ids: Vec<&str> = results.iter().map(|d| d.dish_id.as_str()).collect();
        assert_eq!(ids, vec!["d2", "d3"]);
    }

    #[test]
    fn max_price_filter_is_inclusive() {
        let catalog = fixture();
        let results = catalog.search(&DishSearchRequest {
            max_price: Some(11.0),
            ..Default::default()
        });
        assert!(results.iter().all(|d| d.price <= 11.0));
        let ids: Vec<&str> = results.iter().map(|d| d.dish_id.as_str()).collect();
        assert_eq!(ids, vec!["d3", "d4"]);
    }

    #[test]
    fn tag_filter_matches_any_supplied_tag() {
        let catalog = fixture();
        let results = catalog.search(&DishSearchRequest {
            tags: Some(vec!["VEGAN".to_string(), "Spicy".to_string()]),
            ..Default::default()
        });
        let ids: Vec<&str> = results.iter().map(|d| d.dish_id.as_str()).collect();
        assert_eq!(ids, vec!["d2", "d3", "d4"]);
    }

    #[test]
    fn filters_combine_conjunctively() {
        let catalog = fixture();
        let results = catalog.search(&DishSearchRequest {
            dish_name: Some("chicken".to_string()),
            restaurant_id: Some("r2".to_string()),
            tags: Some(vec!["spicy".to_string()]),
            max_price: Some(12.0),
            min_popularity_score: Some(0.75),
        });
        let ids: Vec<&str> = results.iter().map(|d| d.dish_id.as_str()).collect();
        assert_eq!(ids, vec!["d3"]);
    }

    #[test]
    fn point_lookups_resolve_by_id() {
        let catalog = fixture();
        assert_eq!(catalog.dish("d3").map(|d| d.dish_name.as_str()), Some("Chicken Curry"));
        assert_eq!(catalog.restaurant("r1").map(|r| r.name.as_str()), Some("Pizza Palace"));
        assert!(catalog.dish("missing").is_none());
        assert!(catalog.restaurant("missing").is_none());
    }

    #[test]
    fn summaries_count_dishes_per_restaurant() {
        let catalog = fixture();
        let summaries = catalog.restaurant_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].restaurant_id, "r1");
        assert_eq!(summaries[0].dish_count, 2);
        assert_eq!(summaries[1].dish_count, 2);
    }

    #[test]
    fn load_fails_on_missing_directory() {
        let err = Catalog::load(Path::new("/nonexistent")).expect_err("must fail");
        assert!(matches!(err, CatalogError::Missing(_)));
    }
}
