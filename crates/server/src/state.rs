use service::Services;

#[derive(Clone)]
pub struct ServerState {
    pub services: Services,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub secure_cookies: bool,
}
