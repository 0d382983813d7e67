use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::user_signup::signup,
        handlers::user_login::login,
        handlers::me::me,
    ),
    components(schemas(
        handlers::SessionResponse,
        handlers::user_signup::SignupRequest,
        handlers::user_login::LoginRequest,
        handlers::me::MeResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service build info"),
        (name = "auth", description = "Signup and login, session token issuance"),
        (name = "me", description = "Authenticated identity"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::openapi;

    #[test]
    fn documents_all_routes() {
        let doc = openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/"));
        assert!(paths.contains_key("/api/v1/signup"));
        assert!(paths.contains_key("/api/v1/login"));
        assert!(paths.contains_key("/api/v1/me"));
    }

    #[test]
    fn registers_bearer_security_scheme() {
        let doc = openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_token"));
    }
}
