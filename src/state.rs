use crate::client::ApiClient;
use crate::controller::Controller;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller<ApiClient>>,
}

impl AppState {
    pub fn new(controller: Controller<ApiClient>) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }
}
