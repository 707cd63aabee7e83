use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use super::config::{FoodType, PlacementConfig};
use super::geometry::{Point, Rect};
use super::placement::{Occupant, Placement, place};

/// A consumable item in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub kind: String,
    pub position: Point,
    pub radius: f64,
    pub value: i32,
    pub consumed: bool,
}

impl Food {
    fn of_type(food_type: &FoodType, position: Point) -> Self {
        Self {
            kind: food_type.name.clone(),
            position,
            radius: food_type.radius,
            value: food_type.score_value,
            consumed: false,
        }
    }

    /// Mark as eaten and hand back the score it is worth
    pub fn on_consumed(&mut self) -> i32 {
        self.consumed = true;
        self.value
    }

    pub fn occupant(&self) -> Occupant {
        Occupant::new(self.position, self.radius)
    }
}

/// Owns every food item and the weighted chooser for new ones
#[derive(Debug, Clone)]
pub struct FoodManager {
    foods: Vec<Food>,
    types: Vec<FoodType>,
    chooser: WeightedIndex<f64>,
    max_count: usize,
}

impl FoodManager {
    /// Fails when `types` is empty or a weight is not positive
    pub fn new(types: Vec<FoodType>, max_count: usize) -> anyhow::Result<Self> {
        let chooser = WeightedIndex::new(types.iter().map(|t| t.weight))
            .map_err(|e| anyhow::anyhow!("Invalid food weights: {}", e))?;
        Ok(Self {
            foods: Vec::with_capacity(max_count),
            types,
            chooser,
            max_count,
        })
    }

    /// Weighted-random food type
    pub fn choose_type<R: Rng + ?Sized>(&self, rng: &mut R) -> &FoodType {
        &self.types[self.chooser.sample(rng)]
    }

    /// Drop every item and place a fresh set of `max_count`, each avoiding
    /// `avoid` and the items placed before it
    pub fn respawn_all<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        avoid: &[Occupant],
        arena: Rect,
        params: &PlacementConfig,
    ) {
        self.foods.clear();
        let mut occupied = avoid.to_vec();
        for _ in 0..self.max_count {
            let food_type = self.choose_type(rng).clone();
            let placement = place(rng, &occupied, arena, food_type.radius, params);
            let food = Food::of_type(&food_type, placement.position);
            occupied.push(food.occupant());
            self.foods.push(food);
        }
    }

    /// Re-roll the item at `index` to a new type and place it again.
    ///
    /// `avoid` must describe the snake and walls; the other foods are added here.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut R,
        avoid: &[Occupant],
        arena: Rect,
        params: &PlacementConfig,
    ) -> Placement {
        let mut occupied = avoid.to_vec();
        occupied.extend(
            self.foods
                .iter()
                .enumerate()
                .filter(|(i, f)| *i != index && !f.consumed)
                .map(|(_, f)| f.occupant()),
        );

        let food_type = self.choose_type(rng).clone();
        let placement = place(rng, &occupied, arena, food_type.radius, params);
        self.foods[index] = Food::of_type(&food_type, placement.position);
        placement
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn foods_mut(&mut self) -> &mut [Food] {
        &mut self.foods
    }

    pub fn occupants(&self) -> impl Iterator<Item = Occupant> + '_ {
        self.foods
            .iter()
            .filter(|f| !f.consumed)
            .map(Food::occupant)
    }

    pub fn types(&self) -> &[FoodType] {
        &self.types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::SessionConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn manager(max_count: usize) -> FoodManager {
        FoodManager::new(SessionConfig::default().food_types, max_count).unwrap()
    }

    #[test]
    fn test_rejects_empty_types() {
        assert!(FoodManager::new(Vec::new(), 1).is_err());
    }

    #[test]
    fn test_weighted_choice_follows_weights() {
        let manager = manager(1);
        let mut rng = StdRng::seed_from_u64(11);
        let apples = (0..10_000)
            .filter(|_| manager.choose_type(&mut rng).name == "apple")
            .count();
        // weight 0.7
        assert!((6500..7500).contains(&apples), "apples: {apples}");
    }

    #[test]
    fn test_respawn_places_non_overlapping_items() {
        let mut manager = manager(5);
        let mut rng = StdRng::seed_from_u64(5);
        let params = PlacementConfig::default();
        let snake = [Occupant::new(Point::new(400.0, 300.0), 12.0)];
        manager.respawn_all(&mut rng, &snake, Rect::arena(800.0, 600.0), &params);

        let foods = manager.foods();
        assert_eq!(foods.len(), 5);
        for (i, a) in foods.iter().enumerate() {
            assert!(a.position.distance(snake[0].position) >= a.radius + 12.0 + params.buffer);
            for b in &foods[i + 1..] {
                assert!(a.position.distance(b.position) >= a.radius + b.radius + params.buffer);
            }
        }
    }

    #[test]
    fn test_consume_and_relocate() {
        let mut manager = manager(2);
        let mut rng = StdRng::seed_from_u64(8);
        let params = PlacementConfig::default();
        let arena = Rect::arena(800.0, 600.0);
        manager.respawn_all(&mut rng, &[], arena, &params);

        let value = manager.foods_mut()[0].on_consumed();
        assert!(value == 10 || value == 20);
        assert!(manager.foods()[0].consumed);
        assert_eq!(manager.occupants().count(), 1);

        let placement = manager.relocate(0, &mut rng, &[], arena, &params);
        let relocated = &manager.foods()[0];
        assert!(!relocated.consumed);
        assert_eq!(relocated.position, placement.position);

        let other = &manager.foods()[1];
        if !placement.is_fallback() {
            assert!(
                relocated.position.distance(other.position)
                    >= relocated.radius + other.radius + params.buffer
            );
        }
    }
}
