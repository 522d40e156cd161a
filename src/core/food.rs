use super::errors::{SimError, SimResult};
use super::types::{DeliveryHandle, FoodId, TableNumber};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A dish the kitchen can cook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: FoodId,
    /// Unit price added to the table's bill when ordered
    pub price: f64,
    /// Cooking time in seconds
    pub prep_time: f64,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, price: f64, prep_time: f64) -> Self {
        Self {
            id: FoodId::new(id),
            price,
            prep_time,
        }
    }
}

/// One order line: a food requested by a table.
///
/// Order lines are matched on their food id only; the table number travels
/// with the line so that cooked food knows where it belongs.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSlot {
    food: FoodId,
    price: f64,
    prep_time: f64,
    table: TableNumber,
}

impl FoodSlot {
    pub fn new(item: &MenuItem, table: TableNumber) -> Self {
        Self {
            food: item.id.clone(),
            price: item.price,
            prep_time: item.prep_time,
            table,
        }
    }

    pub fn food(&self) -> &FoodId {
        &self.food
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn prep_time(&self) -> f64 {
        self.prep_time
    }

    pub fn table(&self) -> TableNumber {
        self.table
    }

    pub fn matches(&self, food: &FoodId) -> bool {
        &self.food == food
    }
}

/// A cooked food item produced by a prep slot
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedFood {
    handle: DeliveryHandle,
    food: FoodId,
    table: TableNumber,
}

impl PreparedFood {
    pub fn from_order(order: &FoodSlot) -> Self {
        Self {
            handle: DeliveryHandle::new(),
            food: order.food().clone(),
            table: order.table(),
        }
    }

    pub fn handle(&self) -> DeliveryHandle {
        self.handle
    }

    pub fn food(&self) -> &FoodId {
        &self.food
    }

    pub fn table(&self) -> TableNumber {
        self.table
    }
}

/// Immutable set of dishes customers can order
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    items: Vec<MenuItem>,
}

impl FoodCatalog {
    /// Build a catalog, rejecting empty menus, duplicate ids and negative
    /// prices or prep times
    pub fn new(items: Vec<MenuItem>) -> SimResult<Self> {
        if items.is_empty() {
            return Err(SimError::ConfigurationRange(
                "menu must contain at least one item".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.clone()) {
                return Err(SimError::ConfigurationRange(format!(
                    "duplicate menu item '{}'",
                    item.id
                )));
            }
            if !(item.price >= 0.0) || !item.price.is_finite() {
                return Err(SimError::ConfigurationRange(format!(
                    "menu item '{}' has invalid price {}",
                    item.id, item.price
                )));
            }
            if !(item.prep_time >= 0.0) || !item.prep_time.is_finite() {
                return Err(SimError::ConfigurationRange(format!(
                    "menu item '{}' has invalid prep time {}",
                    item.id, item.prep_time
                )));
            }
        }

        Ok(Self { items })
    }

    /// Draw a menu item uniformly at random
    pub fn random_item<R: Rng + ?Sized>(&self, rng: &mut R) -> &MenuItem {
        &self.items[rng.gen_range(0..self.items.len())]
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new("burger", 12.0, 6.0),
            MenuItem::new("fries", 4.5, 3.0),
        ]
    }

    #[test]
    fn test_catalog_rejects_bad_menus() {
        assert!(FoodCatalog::new(vec![]).is_err());

        let mut dup = menu();
        dup.push(MenuItem::new("burger", 1.0, 1.0));
        assert!(matches!(
            FoodCatalog::new(dup),
            Err(SimError::ConfigurationRange(_))
        ));

        assert!(FoodCatalog::new(vec![MenuItem::new("soup", -1.0, 1.0)]).is_err());
        assert!(FoodCatalog::new(vec![MenuItem::new("soup", 1.0, f64::NAN)]).is_err());
    }

    #[test]
    fn test_random_item_comes_from_menu() {
        let catalog = FoodCatalog::new(menu()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let item = catalog.random_item(&mut rng);
            assert!(catalog.items().iter().any(|known| known.id == item.id));
        }
    }

    #[test]
    fn test_order_line_carries_table_and_prep_time() {
        let catalog = FoodCatalog::new(menu()).unwrap();
        let item = &catalog.items()[1];
        let line = FoodSlot::new(item, TableNumber(4));
        assert_eq!(line.table(), TableNumber(4));
        assert_eq!(line.prep_time(), 3.0);
        assert!(line.matches(&FoodId::from("fries")));
        assert!(!line.matches(&FoodId::from("burger")));

        let cooked = PreparedFood::from_order(&line);
        assert_eq!(cooked.table(), TableNumber(4));
        assert_eq!(cooked.food(), line.food());
    }
}
