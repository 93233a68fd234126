/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
    /// Item store, built once at startup.
    pub store: S,
}
