mod health;
mod metrics;
mod url;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use url::{
    create_url_handler, delete_url_handler, get_url_handler, no_route_handler, redirect_handler,
};
