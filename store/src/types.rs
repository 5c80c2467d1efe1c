use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record kind owned by the store and persisted as one snapshot per kind.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Backend key holding the serialized collection.
    const KEY: &'static str;

    fn id(&self) -> &str;

    /// Checked before a record is added or patched into a collection.
    fn validate(&self) -> Result<(), FieldError> {
        Ok(())
    }
}

/// A record field holding a value the store refuses to persist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{field}` {reason}")]
pub struct FieldError {
    pub field: &'static str,
    pub reason: &'static str,
}

/// Quantities must survive a JSON round trip, so NaN and infinities are out.
fn check_quantity(quantity: f64) -> Result<(), FieldError> {
    let reason = if !quantity.is_finite() {
        "must be a finite number"
    } else if quantity < 0.0 {
        "must not be negative"
    } else {
        return Ok(());
    };
    Err(FieldError {
        field: "quantity",
        reason,
    })
}

/// Shallow partial update: every supplied field replaces the stored value.
pub trait Patch<T> {
    fn apply_to(self, target: &mut T);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub tags: Vec<String>,
    pub image: String,
}

impl Recipe {
    /// Preparation plus cooking minutes.
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}

impl Entity for Recipe {
    const KEY: &'static str = "recipes";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), FieldError> {
        if self.servings == 0 {
            return Err(FieldError {
                field: "servings",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub tags: Vec<String>,
    pub image: String,
}

impl NewRecipe {
    pub(crate) fn into_recipe(self, id: String) -> Recipe {
        Recipe {
            id,
            name: self.name,
            description: self.description,
            ingredients: self.ingredients,
            instructions: self.instructions,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            tags: dedup_tags(self.tags),
            image: self.image,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
}

impl Patch<Recipe> for RecipePatch {
    fn apply_to(self, target: &mut Recipe) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(ingredients) = self.ingredients {
            target.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            target.instructions = instructions;
        }
        if let Some(prep_time) = self.prep_time {
            target.prep_time = prep_time;
        }
        if let Some(cook_time) = self.cook_time {
            target.cook_time = cook_time;
        }
        if let Some(servings) = self.servings {
            target.servings = servings;
        }
        if let Some(tags) = self.tags {
            target.tags = dedup_tags(tags);
        }
        if let Some(image) = self.image {
            target.image = image;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

/// Recipe ids planned for one day. Ids are weak references and may dangle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snacks: Option<Vec<String>>,
}

impl Meals {
    pub fn slot(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_deref(),
            MealSlot::Lunch => self.lunch.as_deref(),
            MealSlot::Dinner => self.dinner.as_deref(),
        }
    }

    pub fn set_slot(&mut self, slot: MealSlot, recipe_id: Option<String>) {
        match slot {
            MealSlot::Breakfast => self.breakfast = recipe_id,
            MealSlot::Lunch => self.lunch = recipe_id,
            MealSlot::Dinner => self.dinner = recipe_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    /// Only the calendar day is meaningful; the time of day is kept as given.
    #[serde(with = "date_format")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub meals: Meals,
}

impl Entity for MealPlan {
    const KEY: &'static str = "mealPlans";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMealPlan {
    pub date: DateTime<Utc>,
    pub meals: Meals,
}

impl NewMealPlan {
    pub(crate) fn into_meal_plan(self, id: String) -> MealPlan {
        MealPlan {
            id,
            date: self.date,
            meals: self.meals,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MealPlanPatch {
    pub date: Option<DateTime<Utc>>,
    /// Replaces the whole mapping; slots absent from the new value are cleared.
    pub meals: Option<Meals>,
}

impl Patch<MealPlan> for MealPlanPatch {
    fn apply_to(self, target: &mut MealPlan) {
        if let Some(date) = self.date {
            target.date = date;
        }
        if let Some(meals) = self.meals {
            target.meals = meals;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "date_format::option"
    )]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl Entity for InventoryItem {
    const KEY: &'static str = "inventoryItems";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), FieldError> {
        check_quantity(self.quantity)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewInventoryItem {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl NewInventoryItem {
    pub(crate) fn into_item(self, id: String) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            unit: self.unit,
            expiry_date: self.expiry_date,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventoryItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    /// `Some(None)` clears the expiry date.
    pub expiry_date: Option<Option<DateTime<Utc>>>,
}

impl Patch<InventoryItem> for InventoryItemPatch {
    fn apply_to(self, target: &mut InventoryItem) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(category) = self.category {
            target.category = category;
        }
        if let Some(quantity) = self.quantity {
            target.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            target.unit = unit;
        }
        if let Some(expiry_date) = self.expiry_date {
            target.expiry_date = expiry_date;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub checked: bool,
}

impl Entity for ShoppingItem {
    const KEY: &'static str = "shoppingItems";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), FieldError> {
        check_quantity(self.quantity)
    }
}

/// New shopping items always start unchecked, so there is no `checked` field.
#[derive(Clone, Debug, PartialEq)]
pub struct NewShoppingItem {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
}

impl NewShoppingItem {
    pub(crate) fn into_item(self, id: String) -> ShoppingItem {
        ShoppingItem {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            unit: self.unit,
            checked: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShoppingItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub checked: Option<bool>,
}

impl Patch<ShoppingItem> for ShoppingItemPatch {
    fn apply_to(self, target: &mut ShoppingItem) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(category) = self.category {
            target.category = category;
        }
        if let Some(quantity) = self.quantity {
            target.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            target.unit = unit;
        }
        if let Some(checked) = self.checked {
            target.checked = checked;
        }
    }
}

/// Drop repeated tags, keeping the first occurrence of each.
pub(crate) fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// RFC 3339 text on the way out; RFC 3339 or a bare `YYYY-MM-DD` on the way in.
pub(crate) mod date_format {
    use chrono::DateTime;
    use chrono::NaiveDate;
    use chrono::NaiveTime;
    use chrono::SecondsFormat;
    use chrono::Utc;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub(crate) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|day| day.and_time(NaiveTime::MIN).and_utc())
            .map_err(|e| format!("invalid date {raw:?}: {e}"))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            date: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) => parse(&raw).map(Some).map_err(D::Error::custom),
                None => Ok(None),
            }
        }
    }
}
