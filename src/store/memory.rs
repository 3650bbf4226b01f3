//! In-process data store used for local development and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{EntityStore, StoreError};
use crate::domain::{
    unix_now, Entity, EntityList, FieldChangeSummary, QueryFilter, Recipe, RecipeStep,
    RecipeStepIngredient, SortDirection, ValidIngredient, ValidInstrument, ValidPreparation,
};

/// Rows of one entity type keyed by id.
pub struct Table<E> {
    rows: DashMap<u64, E>,
    next_id: AtomicU64,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<E: Entity> Table<E> {
    fn live(&self, scope: &E::Scope, id: u64) -> Option<E> {
        self.rows
            .get(&id)
            .map(|row| row.value().clone())
            .filter(|row| row.scope() == *scope && !row.timestamps().is_archived())
    }
}

/// Gives the generic store access to the table for `E`.
pub trait HasTable<E> {
    fn table(&self) -> &Table<E>;
}

/// DashMap-backed store holding every entity type.
#[derive(Default)]
pub struct InMemoryDataStore {
    recipes: Table<Recipe>,
    recipe_steps: Table<RecipeStep>,
    recipe_step_ingredients: Table<RecipeStepIngredient>,
    valid_instruments: Table<ValidInstrument>,
    valid_ingredients: Table<ValidIngredient>,
    valid_preparations: Table<ValidPreparation>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! has_table {
    ($entity:ty, $field:ident) => {
        impl HasTable<$entity> for InMemoryDataStore {
            fn table(&self) -> &Table<$entity> {
                &self.$field
            }
        }
    };
}

has_table!(Recipe, recipes);
has_table!(RecipeStep, recipe_steps);
has_table!(RecipeStepIngredient, recipe_step_ingredients);
has_table!(ValidInstrument, valid_instruments);
has_table!(ValidIngredient, valid_ingredients);
has_table!(ValidPreparation, valid_preparations);

#[async_trait]
impl<E> EntityStore<E> for InMemoryDataStore
where
    E: Entity,
    InMemoryDataStore: HasTable<E>,
{
    async fn get(&self, scope: &E::Scope, id: u64) -> Result<E, StoreError> {
        <Self as HasTable<E>>::table(self)
            .live(scope, id)
            .ok_or(StoreError::NotFound { kind: E::KIND, id })
    }

    async fn list(&self, scope: &E::Scope, filter: &QueryFilter) -> Result<EntityList<E>, StoreError> {
        let table = <Self as HasTable<E>>::table(self);
        let mut rows: Vec<E> = table
            .rows
            .iter()
            .map(|row| row.value().clone())
            .filter(|row| row.scope() == *scope)
            .filter(|row| filter.include_archived || !row.timestamps().is_archived())
            .collect();

        match filter.sort_by {
            SortDirection::Ascending => rows.sort_by_key(|row| row.id()),
            SortDirection::Descending => rows.sort_by_key(|row| std::cmp::Reverse(row.id())),
        }

        let total = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(filter.offset())
            .take(usize::from(filter.limit))
            .collect();
        Ok(EntityList::new(items, filter, total))
    }

    async fn create(&self, scope: &E::Scope, input: &E::CreationInput, user_id: u64) -> Result<E, StoreError> {
        let table = <Self as HasTable<E>>::table(self);
        let id = table.next_id.fetch_add(1, Ordering::Relaxed);
        let mut entity = E::from_creation_input(id, scope, input, user_id);
        entity.timestamps_mut().created_on = unix_now();
        table.rows.insert(id, entity.clone());

        tracing::debug!(kind = E::KIND, id, user_id, "Entity created");
        Ok(entity)
    }

    async fn update(&self, entity: &E, user_id: u64, changes: &[FieldChangeSummary]) -> Result<(), StoreError> {
        let table = <Self as HasTable<E>>::table(self);
        let id = entity.id();
        let mut row = table
            .rows
            .get_mut(&id)
            .filter(|row| !row.timestamps().is_archived())
            .ok_or(StoreError::NotFound { kind: E::KIND, id })?;

        let mut updated = entity.clone();
        updated.timestamps_mut().last_updated_on = Some(unix_now());
        *row = updated;

        tracing::debug!(kind = E::KIND, id, user_id, changed_fields = changes.len(), "Entity updated");
        Ok(())
    }

    async fn archive(&self, scope: &E::Scope, id: u64, account_id: u64, user_id: u64) -> Result<(), StoreError> {
        let table = <Self as HasTable<E>>::table(self);
        let mut row = table
            .rows
            .get_mut(&id)
            .filter(|row| row.scope() == *scope && !row.timestamps().is_archived())
            .ok_or(StoreError::NotFound { kind: E::KIND, id })?;

        row.timestamps_mut().archived_on = Some(unix_now());

        tracing::debug!(kind = E::KIND, id, account_id, user_id, "Entity archived");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecipeCreationInput, RecipeScope, RecipeStepCreationInput};

    fn recipe_input(name: &str) -> RecipeCreationInput {
        RecipeCreationInput {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = InMemoryDataStore::new();
        let created = EntityStore::<Recipe>::create(&store, &(), &recipe_input("Soup"), 42)
            .await
            .unwrap();

        assert_eq!(created.created_by_user, 42);
        assert!(created.timestamps.created_on > 0);

        let fetched = EntityStore::<Recipe>::get(&store, &(), created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_respects_scope() {
        let store = InMemoryDataStore::new();
        let input = RecipeStepCreationInput {
            preparation_id: 5,
            ..Default::default()
        };
        let step = EntityStore::<RecipeStep>::create(&store, &RecipeScope { recipe_id: 1 }, &input, 1)
            .await
            .unwrap();

        let other = EntityStore::<RecipeStep>::get(&store, &RecipeScope { recipe_id: 2 }, step.id).await;
        assert!(matches!(other, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_paginates_and_hides_archived() {
        let store = InMemoryDataStore::new();
        for name in ["a", "b", "c", "d"] {
            EntityStore::<Recipe>::create(&store, &(), &recipe_input(name), 1)
                .await
                .unwrap();
        }
        EntityStore::<Recipe>::archive(&store, &(), 1, 7, 1).await.unwrap();

        let filter = QueryFilter {
            page: 1,
            limit: 2,
            ..QueryFilter::default()
        };
        let page = EntityStore::<Recipe>::list(&store, &(), &filter).await.unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.items.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);

        let everything = QueryFilter {
            include_archived: true,
            sort_by: SortDirection::Descending,
            ..QueryFilter::default()
        };
        let page = EntityStore::<Recipe>::list(&store, &(), &everything).await.unwrap();
        assert_eq!(page.items.first().map(|r| r.id), Some(4));
        assert_eq!(page.total_count, 4);
    }

    #[tokio::test]
    async fn test_archived_entities_cannot_be_updated() {
        let store = InMemoryDataStore::new();
        let recipe = EntityStore::<Recipe>::create(&store, &(), &recipe_input("Stew"), 1)
            .await
            .unwrap();
        EntityStore::<Recipe>::archive(&store, &(), recipe.id, 7, 1).await.unwrap();

        let result = EntityStore::<Recipe>::update(&store, &recipe, 1, &[]).await;
        assert_eq!(result, Err(StoreError::NotFound { kind: "recipe", id: recipe.id }));
    }
}
