//! Weekly planner queries over meal plans.
//!
//! Plans are matched to calendar days in UTC. When several plans share a day
//! the first one in collection order wins and the rest stay shadowed.

use crate::types::MealPlan;
use crate::types::MealSlot;
use crate::types::Recipe;
use chrono::DateTime;
use chrono::Datelike;
use chrono::Days;
use chrono::NaiveDate;
use chrono::Utc;

/// Monday of the week containing `day`, clamped to [`NaiveDate::MIN`].
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN)
}

/// The seven days from `start`; fewer when the calendar ends first.
pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    std::iter::successors(Some(start), NaiveDate::succ_opt)
        .take(7)
        .collect()
}

pub fn calendar_day(date: DateTime<Utc>) -> NaiveDate {
    date.date_naive()
}

pub fn plan_for_date(plans: &[MealPlan], day: NaiveDate) -> Option<&MealPlan> {
    plans.iter().find(|p| calendar_day(p.date) == day)
}

/// Dangling ids resolve to `None`.
pub fn resolve_recipe<'a>(recipes: &'a [Recipe], id: &str) -> Option<&'a Recipe> {
    recipes.iter().find(|r| r.id == id)
}

/// One day of the planner with every slot resolved to a recipe.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DayMenu<'a> {
    pub plan_id: Option<&'a str>,
    pub breakfast: Option<&'a Recipe>,
    pub lunch: Option<&'a Recipe>,
    pub dinner: Option<&'a Recipe>,
    pub snacks: Vec<&'a Recipe>,
}

impl<'a> DayMenu<'a> {
    pub fn slot(&self, slot: MealSlot) -> Option<&'a Recipe> {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }
}

pub fn day_menu<'a>(plans: &'a [MealPlan], recipes: &'a [Recipe], day: NaiveDate) -> DayMenu<'a> {
    let Some(plan) = plan_for_date(plans, day) else {
        return DayMenu::default();
    };
    let lookup = |slot: MealSlot| {
        plan.meals
            .slot(slot)
            .and_then(|id| resolve_recipe(recipes, id))
    };
    DayMenu {
        plan_id: Some(plan.id.as_str()),
        breakfast: lookup(MealSlot::Breakfast),
        lunch: lookup(MealSlot::Lunch),
        dinner: lookup(MealSlot::Dinner),
        snacks: plan
            .meals
            .snacks
            .iter()
            .flatten()
            .filter_map(|id| resolve_recipe(recipes, id))
            .collect(),
    }
}
