use log::{info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use crate::api::{self, Connectivity};
use crate::config::EngineConfig;
use crate::interaction::session::PageSession;

/// (picsum id, height, alt)
const GALLERY: &[(u32, u32, &str)] = &[
    (1011, 800, "Kickoff under the lights"),
    (1015, 600, "Road trip to the stadium"),
    (1025, 900, "Sideline mascot"),
    (1035, 700, "Crowd at the falls"),
    (1043, 650, "Tailgate skyline"),
    (1050, 850, "Training camp coast"),
    (1058, 600, "City at night"),
    (1062, 800, "Locker room pup"),
    (1067, 700, "Downtown before the game"),
    (1069, 900, "Halftime show"),
    (1074, 650, "Wildcat defense"),
    (1084, 750, "Cold weather game"),
];

/// (target, label, player, headshot, alt)
const LEADERS: &[(u32, &str, &str, &str, &str)] = &[
    (2836, "Passing Yards Leader:", "Drake Maye", "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4431452.png", "QB"),
    (732, "Rushing Yards Leader:", "Jahmyr Gibbs", "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4429795.png", "RB"),
    (499, "Receiving Yards Leader:", "Romeo Doubs", "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/4361432.png", "WR"),
    (15, "Sacks Leader:", "Myles Garrett", "https://a.espncdn.com/combiner/i?img=/i/headshots/nfl/players/full/3122132.png", "EDGE"),
];

const TRENDS: &[&str] = &["Hottest Offense", "Top Defense", "Biggest Riser"];
const PREDICTIONS: &[&str] = &["Biggest Performance", "Biggest Upset", "Matchup of the Week"];

fn picsum(id: u32, width: u32, height: u32) -> String {
    format!("https://picsum.photos/id/{}/{}/{}", id, width, height)
}

#[function_component(ServiceStatusLine)]
fn service_status_line() -> Html {
    let connectivity = use_state(|| Connectivity::Checking);

    {
        let connectivity = connectivity.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::fetch_status().await {
                        Ok(status) => {
                            info!("stats service reachable: {}", status.status);
                            connectivity.set(Connectivity::Online(status));
                        }
                        Err(e) => {
                            warn!("stats service check failed: {}", e);
                            connectivity.set(Connectivity::Offline);
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let class = match *connectivity {
        Connectivity::Checking => "service-status",
        Connectivity::Online(_) => "service-status online",
        Connectivity::Offline => "service-status offline",
    };

    html! {
        <p class={class}>{ connectivity.label() }</p>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let root = use_node_ref();

    {
        let root = root.clone();
        use_effect_with_deps(
            move |_| {
                let session = root
                    .cast::<Element>()
                    .and_then(|root| PageSession::mount(&root, EngineConfig::default()));
                move || drop(session)
            },
            (),
        );
    }

    html! {
        <div class="home-page" ref={root}>
            <style>{ HOME_CSS }</style>

            <section class="hero">
                <div class="hero-inner">
                    <h1>{"Track Performance. Forecast Greatness."}</h1>
                    <p>{"All the stats you need."}</p>
                </div>
            </section>

            <section class="section" id="leaders">
                <h2>{"Season Stat Leaders"}</h2>
                <div class="cards" data-counters="">
                    { for LEADERS.iter().map(|(target, label, player, headshot, alt)| html! {
                        <div class="card">
                            <img src={*headshot} alt={*alt} />
                            <div class="stat-number" data-target={target.to_string()}>{"0"}</div>
                            <h4>{*label}</h4>
                            <p>{*player}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section class="section" id="gallery">
                <h2>{"Gameday Gallery"}</h2>
                <div class="masonry" id="masonry">
                    { for GALLERY.iter().map(|(id, height, alt)| html! {
                        <figure class="masonry-item">
                            <img
                                src={picsum(*id, 600, *height)}
                                alt={*alt}
                                loading="lazy"
                                data-capability="gallery-image"
                            />
                        </figure>
                    }) }
                </div>
            </section>

            <section class="section" id="trends">
                <h2>{"Trending Teams"}</h2>
                <div class="cards">
                    { for TRENDS.iter().map(|title| html! { <div class="card">{*title}</div> }) }
                </div>
            </section>

            <section class="section" id="predictions">
                <h2>{"Predictions Preview"}</h2>
                <div class="cards">
                    { for PREDICTIONS.iter().map(|title| html! { <div class="card">{*title}</div> }) }
                </div>
            </section>

            <footer class="footer">
                <ServiceStatusLine />
            </footer>

            <div
                id="lightbox"
                class="lightbox"
                aria-hidden="true"
                role="dialog"
                data-capability="lightbox-backdrop"
            >
                <button class="close-btn" aria-label="Close" data-capability="lightbox-close">{"×"}</button>
                <img src="" alt="" />
            </div>
        </div>
    }
}

const HOME_CSS: &str = r#"
    .hero {
        min-height: 70vh;
        display: flex;
        align-items: center;
        justify-content: center;
        text-align: center;
        padding: calc(var(--nav-height) + 2rem) 1.5rem 3rem;
        background: linear-gradient(160deg, #013369 0%, #0b1d3a 60%, #d50a0a 140%);
        color: #fff;
        transition: min-height 0.35s ease, padding 0.35s ease;
    }
    .hero.shrunk {
        min-height: 45vh;
    }
    .hero-inner {
        will-change: transform;
    }
    .hero h1 {
        font-size: clamp(2rem, 5vw, 3.5rem);
        margin: 0 0 1rem;
    }
    .section {
        max-width: 1100px;
        margin: 0 auto;
        padding: 4rem 1.5rem;
    }
    .cards {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
        gap: 1.5rem;
    }
    .card {
        background: #111827;
        color: #e5e7eb;
        border-radius: 12px;
        padding: 1.5rem;
        text-align: center;
    }
    .card img {
        width: 96px;
        height: 96px;
        object-fit: cover;
        border-radius: 50%;
    }
    .stat-number {
        font-size: 2.5rem;
        font-weight: 700;
        color: #7eb2ff;
        font-variant-numeric: tabular-nums;
    }
    .masonry {
        column-count: 3;
        column-gap: 1rem;
    }
    .masonry-item {
        break-inside: avoid;
        margin: 0 0 1rem;
        opacity: 0;
        transform: translateY(24px);
        transition: opacity 0.5s ease, transform 0.5s ease;
    }
    .masonry-item.visible {
        opacity: 1;
        transform: none;
    }
    .masonry-item img {
        width: 100%;
        display: block;
        border-radius: 8px;
        cursor: zoom-in;
    }
    .lightbox {
        position: fixed;
        inset: 0;
        display: flex;
        align-items: center;
        justify-content: center;
        background: rgba(0, 0, 0, 0.85);
        opacity: 0;
        pointer-events: none;
        transition: opacity 0.3s ease;
        z-index: 100;
    }
    .lightbox.open {
        opacity: 1;
        pointer-events: auto;
    }
    .lightbox img {
        max-width: 90vw;
        max-height: 85vh;
        border-radius: 8px;
    }
    .close-btn {
        position: absolute;
        top: 1rem;
        right: 1.5rem;
        font-size: 2rem;
        background: none;
        border: none;
        color: #fff;
        cursor: pointer;
    }
    .footer {
        text-align: center;
        padding: 2rem;
    }
    .service-status {
        color: #9ca3af;
        font-size: 0.9rem;
    }
    .service-status.online {
        color: #34d399;
    }
    .service-status.offline {
        color: #f87171;
    }
    @media (max-width: 768px) {
        .masonry {
            column-count: 2;
        }
    }
"#;
