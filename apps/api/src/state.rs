use portfolio_application::ContactService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub contact_service: ContactService,
}
