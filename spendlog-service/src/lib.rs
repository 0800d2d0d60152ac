pub mod tracing;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{post, put},
};
use spendlog_adapters::{
    auth::SessionConfig,
    config::AllowedOrigins,
    http::routes::{
        AuthTtls, add_expense, delete_expense, forgot_password, list_expenses, login, logout,
        register, resend_verification, reset_password, update_expense, verify_email,
    },
};
use spendlog_core::{AccountMailer, AccountStore, ExpenseStore, PasswordHasher};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The assembled HTTP service: account lifecycle routes plus the
/// owner-scoped expense routes.
///
/// All collaborators are constructed by the caller and passed in; stores
/// share state through their own internal `Arc`s, so each route receives
/// exactly the state it needs.
pub struct AppService {
    router: Router,
}

impl AppService {
    pub fn new<A, S, H, M>(
        account_store: A,
        expense_store: S,
        password_hasher: H,
        mailer: M,
        session: SessionConfig,
        ttls: AuthTtls,
    ) -> Self
    where
        A: AccountStore + Clone + 'static,
        S: ExpenseStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        M: AccountMailer + Clone + 'static,
    {
        let router = Router::new()
            // Registration issues the verification token and dispatches mail
            .route("/register", post(register::<A, H, M>))
            .with_state((
                account_store.clone(),
                password_hasher.clone(),
                mailer.clone(),
                ttls,
            ))
            // Login mints the session credential
            .route("/login", post(login::<A, H>))
            .with_state((
                account_store.clone(),
                password_hasher.clone(),
                session.clone(),
            ))
            // Logout only removes the cookie; sessions are stateless
            .route("/logout", post(logout))
            .with_state(session.clone())
            .route("/verify-email", post(verify_email::<A>))
            .with_state(account_store.clone())
            .route("/resend-verification", post(resend_verification::<A, M>))
            .with_state((account_store.clone(), mailer.clone(), ttls))
            .route("/forgot-password", post(forgot_password::<A, M>))
            .with_state((account_store.clone(), mailer, ttls))
            .route("/reset-password", post(reset_password::<A, H>))
            .with_state((account_store, password_hasher))
            // Expense routes derive the owner from the session cookie
            .route(
                "/expenses",
                post(add_expense::<S>).get(list_expenses::<S>),
            )
            .route(
                "/expenses/{id}",
                put(update_expense::<S>).delete(delete_expense::<S>),
            )
            .with_state((expense_store, session));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting cross-origin access to the
    /// given allowlist.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server on the given listener.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        ::tracing::info!("Spendlog service listening on {}", listener.local_addr()?);

        let router = self.into_router(allowed_origins);
        axum_server::from_tcp(listener.into_std()?)?
            .serve(router.into_make_service())
            .await
    }
}
