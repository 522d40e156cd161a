use crate::core::food::FoodSlot;

/// Order lines the waiter has memorised at tables and not yet handed to the kitchen.
///
/// Lines are only ever removed all at once, when the whole memory is drained
/// into the prep station queue.
#[derive(Debug, Clone, Default)]
pub struct OrderMemory {
    foods: Vec<FoodSlot>,
}

impl OrderMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_food(&mut self, food: FoodSlot) {
        self.foods.push(food);
    }

    /// Memorised lines, oldest first
    pub fn foods(&self) -> &[FoodSlot] {
        &self.foods
    }

    /// Hand off every memorised line, leaving the memory empty
    pub fn take_all(&mut self) -> Vec<FoodSlot> {
        std::mem::take(&mut self.foods)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::food::MenuItem;
    use crate::core::types::TableNumber;

    #[test]
    fn test_take_all_drains_in_order() {
        let burger = MenuItem::new("burger", 10.0, 2.0);
        let soup = MenuItem::new("soup", 5.0, 1.0);

        let mut memory = OrderMemory::new();
        memory.add_food(FoodSlot::new(&burger, TableNumber(0)));
        memory.add_food(FoodSlot::new(&soup, TableNumber(1)));
        assert_eq!(memory.len(), 2);

        let taken = memory.take_all();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].food().as_str(), "burger");
        assert_eq!(taken[1].table(), TableNumber(1));
        assert!(memory.is_empty());
        assert!(memory.take_all().is_empty());
    }
}
