//! Built-in records used when a collection has never been persisted.

use crate::types::InventoryItem;
use crate::types::MealPlan;
use crate::types::Meals;
use crate::types::Recipe;
use crate::types::ShoppingItem;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub fn recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "1".into(),
            name: "Avocado Toast".into(),
            description: "A simple, nutritious breakfast that's quick to make and full of healthy fats.".into(),
            ingredients: strings(&[
                "2 slices whole grain bread",
                "1 ripe avocado",
                "2 eggs",
                "Salt and pepper to taste",
                "Red pepper flakes (optional)",
                "1 tbsp olive oil",
            ]),
            instructions: strings(&[
                "Toast the bread slices until golden brown.",
                "Cut the avocado in half, remove the pit, and scoop out the flesh into a bowl.",
                "Mash the avocado with a fork, adding salt and pepper to taste.",
                "Spread the mashed avocado on the toast.",
                "Heat olive oil in a pan and fry the eggs to your liking.",
                "Place the fried eggs on top of the avocado toast.",
                "Sprinkle with red pepper flakes if desired.",
            ]),
            prep_time: 5,
            cook_time: 5,
            servings: 1,
            tags: strings(&["breakfast", "healthy", "quick", "vegetarian"]),
            image: "https://images.unsplash.com/photo-1525351484163-7529414344d8?q=80&w=2080&auto=format&fit=crop".into(),
        },
        Recipe {
            id: "2".into(),
            name: "Classic Pasta Carbonara".into(),
            description: "A traditional Italian pasta dish with eggs, cheese, pancetta and black pepper.".into(),
            ingredients: strings(&[
                "350g spaghetti",
                "150g pancetta or guanciale, diced",
                "3 large eggs",
                "75g Pecorino Romano cheese, grated",
                "50g Parmesan cheese, grated",
                "Freshly ground black pepper",
                "1 clove garlic, minced (optional)",
            ]),
            instructions: strings(&[
                "Bring a large pot of salted water to a boil and cook the spaghetti according to package instructions until al dente.",
                "While the pasta is cooking, heat a large skillet over medium heat. Add the pancetta and cook until crispy, about 8-10 minutes.",
                "In a bowl, whisk together the eggs, grated cheeses, and a generous amount of black pepper.",
                "When the pasta is done, reserve 1 cup of the pasta water, then drain the pasta.",
                "Working quickly, add the hot pasta to the skillet with the pancetta. Toss to combine.",
                "Remove the skillet from the heat and pour in the egg and cheese mixture, stirring rapidly to create a creamy sauce.",
                "Add a splash of the reserved pasta water if needed to loosen the sauce.",
                "Serve immediately with extra grated cheese and black pepper.",
            ]),
            prep_time: 10,
            cook_time: 15,
            servings: 4,
            tags: strings(&["dinner", "Italian", "pasta"]),
            image: "https://images.unsplash.com/photo-1612874742237-6526221588e3?q=80&w=2071&auto=format&fit=crop".into(),
        },
        Recipe {
            id: "3".into(),
            name: "Berry Smoothie Bowl".into(),
            description: "A refreshing and nutritious smoothie bowl topped with fresh fruits and granola.".into(),
            ingredients: strings(&[
                "1 cup mixed berries (strawberries, blueberries, raspberries)",
                "1 frozen banana",
                "1/2 cup Greek yogurt",
                "1/4 cup almond milk",
                "1 tbsp honey or maple syrup",
                "Toppings: sliced fruits, granola, chia seeds, coconut flakes",
            ]),
            instructions: strings(&[
                "Add the berries, frozen banana, Greek yogurt, almond milk, and honey to a blender.",
                "Blend until smooth and creamy. The consistency should be thicker than a regular smoothie.",
                "Pour into a bowl.",
                "Arrange your toppings artfully on top of the smoothie base.",
                "Serve immediately and enjoy with a spoon.",
            ]),
            prep_time: 5,
            cook_time: 0,
            servings: 1,
            tags: strings(&["breakfast", "healthy", "quick", "vegetarian"]),
            image: "https://images.unsplash.com/photo-1577805947697-89e18249d767?q=80&w=2098&auto=format&fit=crop".into(),
        },
    ]
}

/// Today's plan: avocado toast, smoothie bowl, carbonara.
pub fn meal_plans(now: DateTime<Utc>) -> Vec<MealPlan> {
    vec![MealPlan {
        id: "1".into(),
        date: now,
        meals: Meals {
            breakfast: Some("1".into()),
            lunch: Some("3".into()),
            dinner: Some("2".into()),
            snacks: None,
        },
    }]
}

pub fn inventory_items(now: DateTime<Utc>) -> Vec<InventoryItem> {
    vec![
        InventoryItem {
            id: "1".into(),
            name: "Eggs".into(),
            category: "Dairy & Eggs".into(),
            quantity: 6.0,
            unit: "pcs".into(),
            expiry_date: None,
        },
        InventoryItem {
            id: "2".into(),
            name: "Milk".into(),
            category: "Dairy & Eggs".into(),
            quantity: 1.0,
            unit: "liter".into(),
            expiry_date: Some(now + Duration::days(5)),
        },
        InventoryItem {
            id: "3".into(),
            name: "Bread".into(),
            category: "Bakery".into(),
            quantity: 1.0,
            unit: "loaf".into(),
            expiry_date: Some(now + Duration::days(3)),
        },
    ]
}

pub fn shopping_items() -> Vec<ShoppingItem> {
    vec![
        ShoppingItem {
            id: "1".into(),
            name: "Avocados".into(),
            category: "Produce".into(),
            quantity: 3.0,
            unit: "pcs".into(),
            checked: false,
        },
        ShoppingItem {
            id: "2".into(),
            name: "Pasta".into(),
            category: "Dry Goods".into(),
            quantity: 1.0,
            unit: "pkg".into(),
            checked: false,
        },
    ]
}
