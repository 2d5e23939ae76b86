use crate::commentary::Commentator;
use crate::store::{COMMENTARY_WINDOW, RecordStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<RecordStore>>,
    pub commentator: Arc<Commentator>,
}

impl AppState {
    pub fn new(store: RecordStore, commentator: Arc<Commentator>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            commentator,
        }
    }

    /// Asks for fresh commentary on the latest rounds of `store`.
    ///
    /// Callers pass the guard they mutated through, so commentary generations
    /// follow the order in which changes were made.
    pub async fn refresh_commentary(&self, store: &RecordStore) -> Option<JoinHandle<()>> {
        self.commentator
            .refresh(store.latest(COMMENTARY_WINDOW).to_vec())
            .await
    }
}
