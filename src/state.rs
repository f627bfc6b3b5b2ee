use std::sync::Arc;

use crate::notify::NotifierSet;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub notifiers: NotifierSet,
}
