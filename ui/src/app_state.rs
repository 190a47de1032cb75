use api::Deployment;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct AppStateData {
    pub deployment: Deployment,
}

/// Fixed for the life of the app: which chain and contracts we point at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(deployment: Deployment) -> Self {
        Self(Arc::new(AppStateData { deployment }))
    }
}
