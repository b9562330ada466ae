// handlers/mod.rs - Two security tiers:
// Public (no auth): POST /users, POST /auth/token, /, /health
// Protected (bearer auth): GET /users, GET/PUT/DELETE /users/:id, GET /auth/whoami

pub mod auth;
pub mod users;
pub mod validation;
