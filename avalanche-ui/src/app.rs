//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, Toast};
use crate::pages::{Builders, Dashboard, Login, Register};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="page">
                <Nav />

                <main class="page-wrapper container-xl py-4">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/ac/login" view=Login />
                        <Route path="/ac/register" view=Register />
                        <Route path="/builders" view=Builders />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="empty">
            <p class="empty-title">"Page Not Found"</p>
            <p class="empty-subtitle text-muted">"The page you're looking for doesn't exist."</p>
            <A href="/" class="btn btn-primary">"Go to Dashboard"</A>
        </div>
    }
}
