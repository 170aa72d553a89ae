//! KeepNote backend: category and reminder resources behind session login.

pub mod config;
pub mod db;
pub mod error;
pub mod observer;
pub mod routes;
pub mod state;

pub mod models {
    pub mod category;
    pub mod message;
    pub mod reminder;
    pub mod session;
    pub mod user;
}

pub mod repositories {
    pub mod category;
    pub mod column;
    pub mod reminder;
    pub mod user;
}

pub mod services {
    pub mod category;
    pub mod memory;
    pub mod reminder;
    pub mod session;
    pub mod user;
}

pub mod handlers {
    pub mod auth;
    pub mod category;
    pub mod reminder;
}

pub mod middleware_layer {
    pub mod auth;
    pub mod logging;
}

pub mod validation {
    pub mod auth;
    pub mod request;
}

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
