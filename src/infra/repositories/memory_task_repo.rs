use crate::domain::{models::task::Task, ports::TaskRepository};
use async_trait::async_trait;
use tokio::sync::RwLock;

struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

/// Task list held in process memory. Lost on restart.
pub struct InMemoryTaskRepo {
    inner: RwLock<TaskList>,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TaskList { tasks: Vec::new(), next_id: 1 }),
        }
    }
}

impl Default for InMemoryTaskRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepo {
    async fn list(&self) -> Vec<Task> {
        self.inner.read().await.tasks.clone()
    }

    async fn add(&self, text: String) -> Task {
        let mut list = self.inner.write().await;
        let task = Task { id: list.next_id, text };
        list.next_id += 1;
        list.tasks.push(task.clone());
        task
    }

    async fn find(&self, id: u64) -> Option<Task> {
        self.inner.read().await.tasks.iter().find(|t| t.id == id).cloned()
    }

    async fn update(&self, id: u64, text: String) -> Option<Task> {
        let mut list = self.inner.write().await;
        let task = list.tasks.iter_mut().find(|t| t.id == id)?;
        task.text = text;
        Some(task.clone())
    }

    async fn delete(&self, id: u64) -> bool {
        let mut list = self.inner.write().await;
        let before = list.tasks.len();
        list.tasks.retain(|t| t.id != id);
        list.tasks.len() != before
    }
}
