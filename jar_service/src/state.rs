// jar_service/src/state.rs
use clayjar::JarService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub jar_service: Arc<JarService>,
}
