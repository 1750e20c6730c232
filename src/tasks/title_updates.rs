//! Title update background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::state::AppState;

/// Background task that follows timer snapshots and logs every new title,
/// standing in for a tray or window title.
pub async fn title_update_task(state: Arc<AppState>) {
    info!("Starting title update task");

    let mut updates = state.subscribe();

    while updates.changed().await.is_ok() {
        let title = updates.borrow_and_update().title.clone();
        debug!("{}", title);
    }

    debug!("Timer update channel closed, stopping title updates");
}
