//! Axum admin surface for cachetier.
//!
//! One route serves the node cache page; both of its forms post back to
//! the same route with an `action` discriminator. Successful submissions
//! redirect to the `referer` query parameter (or the page itself) with a
//! confirmation message key; failed validation re-renders the page with
//! the errors attached to their fields and the operator's input intact.

mod handlers;
mod state;
mod view;

pub use handlers::router;
pub use state::AppState;
