//! The kitchen store: single owner of the four collections.
//!
//! Every mutation runs to completion before returning: the new collection is
//! computed, validated and encoded, committed in memory, then written to the
//! backend as one whole snapshot. A rejected record or an encoding failure
//! leaves both memory and backend untouched. Mutations addressed at an
//! unknown id are silent no-ops and write nothing.

use crate::backend::KvBackend;
use crate::error::Result;
use crate::error::StoreError;
use crate::inventory;
use crate::planner;
use crate::planner::DayMenu;
use crate::sample;
use crate::search;
use crate::shopping::ShoppingProgress;
use crate::types::Entity;
use crate::types::InventoryItem;
use crate::types::InventoryItemPatch;
use crate::types::MealPlan;
use crate::types::MealPlanPatch;
use crate::types::MealSlot;
use crate::types::Meals;
use crate::types::NewInventoryItem;
use crate::types::NewMealPlan;
use crate::types::NewRecipe;
use crate::types::NewShoppingItem;
use crate::types::Patch;
use crate::types::Recipe;
use crate::types::RecipePatch;
use crate::types::ShoppingItem;
use crate::types::ShoppingItemPatch;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use tracing::debug;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct Collections {
    recipes: Vec<Recipe>,
    meal_plans: Vec<MealPlan>,
    inventory_items: Vec<InventoryItem>,
    shopping_items: Vec<ShoppingItem>,
}

pub struct KitchenStore {
    backend: Box<dyn KvBackend>,
    state: Option<Collections>,
}

impl KitchenStore {
    /// Build an uninitialized store; call [`KitchenStore::initialize`] before use.
    pub fn new<B: KvBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Box::new(backend),
            state: None,
        }
    }

    /// Construct and initialize in one step.
    pub fn open<B: KvBackend + 'static>(backend: B) -> Result<Self> {
        let mut store = Self::new(backend);
        store.initialize()?;
        Ok(store)
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.initialize_at(Utc::now())
    }

    /// Load every collection, seeding sample data (dated relative to `now`)
    /// for collections that have never been persisted.
    pub fn initialize_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.state.is_some() {
            return Err(StoreError::AlreadyInitialized);
        }
        let backend = &*self.backend;
        // Decode everything before writing any seed so a corrupt snapshot
        // leaves the backend untouched.
        let recipes = load::<Recipe>(backend)?;
        let meal_plans = load::<MealPlan>(backend)?;
        let inventory_items = load::<InventoryItem>(backend)?;
        let shopping_items = load::<ShoppingItem>(backend)?;
        let state = Collections {
            recipes: seed_if_absent(backend, recipes, sample::recipes)?,
            meal_plans: seed_if_absent(backend, meal_plans, || sample::meal_plans(now))?,
            inventory_items: seed_if_absent(backend, inventory_items, || {
                sample::inventory_items(now)
            })?,
            shopping_items: seed_if_absent(backend, shopping_items, sample::shopping_items)?,
        };
        self.state = Some(state);
        Ok(())
    }

    /// Release in-memory state. Everything is already persisted, so nothing
    /// is flushed here. The store can be initialized again afterwards.
    pub fn dispose(&mut self) {
        if self.state.take().is_some() {
            debug!("kitchen store disposed");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn state(&self) -> Result<&Collections> {
        self.state.as_ref().ok_or(StoreError::NotInitialized)
    }

    fn parts(&mut self) -> Result<(&dyn KvBackend, &mut Collections)> {
        let state = self.state.as_mut().ok_or(StoreError::NotInitialized)?;
        Ok((&*self.backend, state))
    }

    // --- Recipes ---

    pub fn recipes(&self) -> Result<&[Recipe]> {
        Ok(&self.state()?.recipes)
    }

    pub fn recipe(&self, id: &str) -> Result<Option<&Recipe>> {
        Ok(planner::resolve_recipe(&self.state()?.recipes, id))
    }

    pub fn add_recipe(&mut self, draft: NewRecipe) -> Result<Recipe> {
        let (backend, state) = self.parts()?;
        let id = fresh_id(&state.recipes);
        insert(backend, &mut state.recipes, draft.into_recipe(id))
    }

    pub fn update_recipe(&mut self, id: &str, patch: RecipePatch) -> Result<()> {
        let (backend, state) = self.parts()?;
        update(backend, &mut state.recipes, id, patch)
    }

    pub fn delete_recipe(&mut self, id: &str) -> Result<()> {
        let (backend, state) = self.parts()?;
        remove(backend, &mut state.recipes, id)
    }

    pub fn search_recipes(&self, query: &str) -> Result<Vec<&Recipe>> {
        Ok(search::search_recipes(&self.state()?.recipes, query))
    }

    // --- Meal plans ---

    pub fn meal_plans(&self) -> Result<&[MealPlan]> {
        Ok(&self.state()?.meal_plans)
    }

    pub fn add_meal_plan(&mut self, draft: NewMealPlan) -> Result<MealPlan> {
        let (backend, state) = self.parts()?;
        let id = fresh_id(&state.meal_plans);
        insert(backend, &mut state.meal_plans, draft.into_meal_plan(id))
    }

    pub fn update_meal_plan(&mut self, id: &str, patch: MealPlanPatch) -> Result<()> {
        let (backend, state) = self.parts()?;
        update(backend, &mut state.meal_plans, id, patch)
    }

    pub fn delete_meal_plan(&mut self, id: &str) -> Result<()> {
        let (backend, state) = self.parts()?;
        remove(backend, &mut state.meal_plans, id)
    }

    /// The first plan on `day`; later plans for the same day are shadowed.
    pub fn plan_for_date(&self, day: NaiveDate) -> Result<Option<&MealPlan>> {
        Ok(planner::plan_for_date(&self.state()?.meal_plans, day))
    }

    pub fn day_menu(&self, day: NaiveDate) -> Result<DayMenu<'_>> {
        let state = self.state()?;
        Ok(planner::day_menu(&state.meal_plans, &state.recipes, day))
    }

    /// Assign or clear one slot on the plan for `date`'s day.
    ///
    /// With an existing plan the slot is set (or removed) and the whole
    /// `meals` mapping replaced. Without one, a new plan holding only that
    /// slot is created when a recipe is given. Returns the affected plan id.
    pub fn set_meal(
        &mut self,
        date: DateTime<Utc>,
        slot: MealSlot,
        recipe_id: Option<String>,
    ) -> Result<Option<String>> {
        let existing = self
            .plan_for_date(planner::calendar_day(date))?
            .map(|plan| (plan.id.clone(), plan.meals.clone()));
        match (existing, recipe_id) {
            (Some((plan_id, mut meals)), recipe_id) => {
                meals.set_slot(slot, recipe_id);
                self.update_meal_plan(
                    &plan_id,
                    MealPlanPatch {
                        meals: Some(meals),
                        ..MealPlanPatch::default()
                    },
                )?;
                Ok(Some(plan_id))
            }
            (None, Some(recipe_id)) => {
                let mut meals = Meals::default();
                meals.set_slot(slot, Some(recipe_id));
                let plan = self.add_meal_plan(NewMealPlan { date, meals })?;
                Ok(Some(plan.id))
            }
            (None, None) => Ok(None),
        }
    }

    // --- Inventory ---

    pub fn inventory_items(&self) -> Result<&[InventoryItem]> {
        Ok(&self.state()?.inventory_items)
    }

    pub fn add_inventory_item(&mut self, draft: NewInventoryItem) -> Result<InventoryItem> {
        let (backend, state) = self.parts()?;
        let id = fresh_id(&state.inventory_items);
        insert(backend, &mut state.inventory_items, draft.into_item(id))
    }

    pub fn update_inventory_item(&mut self, id: &str, patch: InventoryItemPatch) -> Result<()> {
        let (backend, state) = self.parts()?;
        update(backend, &mut state.inventory_items, id, patch)
    }

    pub fn delete_inventory_item(&mut self, id: &str) -> Result<()> {
        let (backend, state) = self.parts()?;
        remove(backend, &mut state.inventory_items, id)
    }

    pub fn items_expiring_within(
        &self,
        days: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<&InventoryItem>> {
        Ok(inventory::expiring_within(
            &self.state()?.inventory_items,
            now,
            days,
        ))
    }

    pub fn expired_items(&self, now: DateTime<Utc>) -> Result<Vec<&InventoryItem>> {
        Ok(inventory::expired(&self.state()?.inventory_items, now))
    }

    // --- Shopping list ---

    pub fn shopping_items(&self) -> Result<&[ShoppingItem]> {
        Ok(&self.state()?.shopping_items)
    }

    /// New items always start unchecked.
    pub fn add_shopping_item(&mut self, draft: NewShoppingItem) -> Result<ShoppingItem> {
        let (backend, state) = self.parts()?;
        let id = fresh_id(&state.shopping_items);
        insert(backend, &mut state.shopping_items, draft.into_item(id))
    }

    /// Add one generic unit of `name`; a blank name adds nothing.
    pub fn quick_add_shopping_item(&mut self, name: &str) -> Result<Option<ShoppingItem>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.add_shopping_item(NewShoppingItem {
            name: name.to_string(),
            category: "General".to_string(),
            quantity: 1.0,
            unit: "item".to_string(),
        })
        .map(Some)
    }

    pub fn update_shopping_item(&mut self, id: &str, patch: ShoppingItemPatch) -> Result<()> {
        let (backend, state) = self.parts()?;
        update(backend, &mut state.shopping_items, id, patch)
    }

    pub fn delete_shopping_item(&mut self, id: &str) -> Result<()> {
        let (backend, state) = self.parts()?;
        remove(backend, &mut state.shopping_items, id)
    }

    pub fn toggle_shopping_item(&mut self, id: &str) -> Result<()> {
        let (backend, state) = self.parts()?;
        let Some(pos) = state.shopping_items.iter().position(|i| i.id == id) else {
            debug!(key = ShoppingItem::KEY, id, "toggle: no such record");
            return Ok(());
        };
        let mut next = state.shopping_items.clone();
        next[pos].checked = !next[pos].checked;
        commit(backend, &mut state.shopping_items, next)
    }

    pub fn shopping_progress(&self) -> Result<ShoppingProgress> {
        Ok(ShoppingProgress::of(&self.state()?.shopping_items))
    }
}

/// `None` when the key was never written (or holds an empty string).
fn load<E: Entity>(backend: &dyn KvBackend) -> Result<Option<Vec<E>>> {
    let Some(raw) = backend.get(E::KEY)? else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    let items: Vec<E> = serde_json::from_str(&raw).map_err(|source| StoreError::CorruptSnapshot {
        key: E::KEY,
        source,
    })?;
    info!(key = E::KEY, count = items.len(), "loaded snapshot");
    Ok(Some(items))
}

fn seed_if_absent<E: Entity>(
    backend: &dyn KvBackend,
    loaded: Option<Vec<E>>,
    seed: impl FnOnce() -> Vec<E>,
) -> Result<Vec<E>> {
    if let Some(items) = loaded {
        return Ok(items);
    }
    let items = seed();
    info!(key = E::KEY, count = items.len(), "no snapshot; seeded sample data");
    let raw = encode(&items)?;
    write::<E>(backend, &raw, items.len())?;
    Ok(items)
}

fn encode<E: Entity>(items: &[E]) -> Result<String> {
    serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: E::KEY,
        source,
    })
}

fn write<E: Entity>(backend: &dyn KvBackend, raw: &str, count: usize) -> Result<()> {
    backend.set(E::KEY, raw)?;
    debug!(key = E::KEY, count, bytes = raw.len(), "persisted snapshot");
    Ok(())
}

/// Encode `next`, swap it in for `items`, then write it out.
fn commit<E: Entity>(backend: &dyn KvBackend, items: &mut Vec<E>, next: Vec<E>) -> Result<()> {
    let raw = encode(&next)?;
    *items = next;
    write::<E>(backend, &raw, items.len())
}

fn validate<E: Entity>(item: &E) -> Result<()> {
    item.validate().map_err(|source| StoreError::InvalidRecord {
        key: E::KEY,
        source,
    })
}

fn fresh_id<E: Entity>(items: &[E]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !items.iter().any(|i| i.id() == id) {
            return id;
        }
    }
}

fn insert<E: Entity>(backend: &dyn KvBackend, items: &mut Vec<E>, item: E) -> Result<E> {
    validate(&item)?;
    let mut next = items.clone();
    next.push(item.clone());
    commit(backend, items, next)?;
    Ok(item)
}

fn update<E: Entity, P: Patch<E>>(
    backend: &dyn KvBackend,
    items: &mut Vec<E>,
    id: &str,
    patch: P,
) -> Result<()> {
    let Some(pos) = items.iter().position(|i| i.id() == id) else {
        debug!(key = E::KEY, id, "update: no such record");
        return Ok(());
    };
    let mut next = items.clone();
    patch.apply_to(&mut next[pos]);
    validate(&next[pos])?;
    commit(backend, items, next)
}

fn remove<E: Entity>(backend: &dyn KvBackend, items: &mut Vec<E>, id: &str) -> Result<()> {
    let next: Vec<E> = items.iter().filter(|i| i.id() != id).cloned().collect();
    if next.len() == items.len() {
        debug!(key = E::KEY, id, "delete: no such record");
        return Ok(());
    }
    commit(backend, items, next)
}
