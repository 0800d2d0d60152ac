pub mod jwt;

pub use jwt::{
    Claims, SessionConfig, SessionTokenError, authorize, create_removal_cookie,
    create_session_cookie, extract_session_token, generate_session_token,
    validate_session_token,
};
