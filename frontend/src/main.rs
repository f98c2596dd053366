use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use web_sys::MouseEvent;

mod api;
mod config;
mod interaction {
    pub mod anchor;
    pub mod counter;
    pub mod dispatch;
    pub mod hero;
    pub mod lightbox;
    pub mod reveal;
    pub mod scroll_lock;
    pub mod session;
    pub mod visibility;
}
mod pages {
    pub mod home;
    pub mod teams;
}

use pages::{
    home::Home,
    teams::Teams,
};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/teams")]
    Teams,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Teams => {
            info!("Rendering Teams page");
            html! { <Teams /> }
        },
        Route::NotFound => {
            info!("Unknown route, rendering Home page");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}

/// In-page sections the nav can jump to on the home page.
const SECTION_LINKS: &[(&str, &str)] = &[
    ("#leaders", "Leaders"),
    ("#gallery", "Gallery"),
    ("#predictions", "Predictions"),
];


#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "links mobile-menu-open"
    } else {
        "links"
    };

    html! {
        <nav class="navbar">
            <style>{ NAV_CSS }</style>
            <div class="nav-left">
                <img src="https://cdn.freebiesupply.com/logos/large/2x/nfl-logo.png" alt="NFL Logo" class="nav-logo" />
                <h3>{"NFL Stats Hub"}</h3>
            </div>

            <button class="burger-menu" onclick={toggle_menu}>
                <span></span>
                <span></span>
                <span></span>
            </button>
            <div class={menu_class} onclick={close_menu}>
                <Link<Route> to={Route::Home} classes="nav-link">
                    {"Home"}
                </Link<Route>>
                <Link<Route> to={Route::Teams} classes="nav-link">
                    {"Teams"}
                </Link<Route>>
                { for SECTION_LINKS.iter().map(|(href, label)| html! {
                    <a class="nav-link" href={*href} data-capability="anchor-link">{*label}</a>
                }) }
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}

const NAV_CSS: &str = r#"
    :root {
        --nav-height: 68px;
    }
    body {
        margin: 0;
        font-family: system-ui, -apple-system, sans-serif;
        background: #0b1120;
        color: #e5e7eb;
    }
    .navbar {
        position: fixed;
        top: 0;
        left: 0;
        right: 0;
        height: var(--nav-height);
        display: flex;
        align-items: center;
        justify-content: space-between;
        padding: 0 1.5rem;
        background: rgba(11, 17, 32, 0.92);
        backdrop-filter: blur(8px);
        z-index: 50;
    }
    .nav-left {
        display: flex;
        align-items: center;
        gap: 0.75rem;
    }
    .nav-logo {
        height: 40px;
    }
    .links {
        display: flex;
        gap: 1.25rem;
    }
    .nav-link {
        color: #e5e7eb;
        text-decoration: none;
    }
    .nav-link:hover {
        color: #7eb2ff;
    }
    .burger-menu {
        display: none;
        flex-direction: column;
        gap: 4px;
        background: none;
        border: none;
        cursor: pointer;
    }
    .burger-menu span {
        width: 24px;
        height: 2px;
        background: #e5e7eb;
    }
    @media (max-width: 768px) {
        .burger-menu {
            display: flex;
        }
        .links {
            display: none;
            position: absolute;
            top: var(--nav-height);
            left: 0;
            right: 0;
            flex-direction: column;
            padding: 1rem 1.5rem;
            background: rgba(11, 17, 32, 0.97);
        }
        .links.mobile-menu-open {
            display: flex;
        }
    }
"#;
