//! In-memory owner of todo records and id assignment.
//!
//! # Design
//! The mapping and the next-id counter live behind a single `RwLock`, so id
//! assignment and every mutation are serialized while reads may overlap.
//! Ids only ever grow and are never handed out twice, which makes the
//! `BTreeMap` key order identical to insertion order.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A single todo item as stored and as returned over the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Validated fields for creating or fully replacing a todo.
///
/// Shared by POST and PUT: an omitted `description` means `null` and an
/// omitted `completed` means `false`, including on update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(u64),
}

#[derive(Debug)]
struct StoreState {
    todos: BTreeMap<u64, Todo>,
    next_id: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            todos: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Cheaply cloneable handle to the shared store.
#[derive(Clone, Debug, Default)]
pub struct TodoStore {
    state: Arc<RwLock<StoreState>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All current todos in insertion order.
    pub async fn list(&self) -> Vec<Todo> {
        let state = self.state.read().await;
        state.todos.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Result<Todo, StoreError> {
        let state = self.state.read().await;
        state.todos.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    pub async fn create(&self, input: TodoInput) -> Todo {
        let mut state = self.state.write().await;
        let id = state.next_id;
        let todo = Todo {
            id,
            title: input.title,
            description: input.description,
            completed: input.completed,
        };
        state.todos.insert(id, todo.clone());
        state.next_id += 1;
        tracing::debug!(id, "todo created");
        todo
    }

    /// Replaces every mutable field of todo `id`; the id itself is kept.
    pub async fn update(&self, id: u64, input: TodoInput) -> Result<Todo, StoreError> {
        let mut state = self.state.write().await;
        let todo = state.todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        todo.title = input.title;
        todo.description = input.description;
        todo.completed = input.completed;
        tracing::debug!(id, "todo updated");
        Ok(todo.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.todos.remove(&id).ok_or(StoreError::NotFound(id))?;
        tracing::debug!(id, "todo deleted");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
