use web_sys::Element;
use yew::prelude::*;

use crate::config::EngineConfig;
use crate::interaction::session::PageSession;

pub struct Team {
    pub name: &'static str,
    pub short: &'static str,
    pub logo: &'static str,
}

pub struct Division {
    pub name: &'static str,
    pub teams: [Team; 4],
}

const fn team(name: &'static str, short: &'static str, logo: &'static str) -> Team {
    Team { name, short, logo }
}

pub static DIVISIONS: [Division; 8] = [
    Division {
        name: "NFC North",
        teams: [
            team("Chicago Bears", "Bears", "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5c/Chicago_Bears_logo.svg/2560px-Chicago_Bears_logo.svg.png"),
            team("Detroit Lions", "Lions", "https://upload.wikimedia.org/wikipedia/en/7/71/Detroit_Lions_logo.svg"),
            team("Green Bay Packers", "Packers", "https://upload.wikimedia.org/wikipedia/commons/thumb/5/50/Green_Bay_Packers_logo.svg/2560px-Green_Bay_Packers_logo.svg.png"),
            team("Minnesota Vikings", "Vikings", "https://upload.wikimedia.org/wikipedia/en/thumb/4/48/Minnesota_Vikings_logo.svg/977px-Minnesota_Vikings_logo.svg.png"),
        ],
    },
    Division {
        name: "NFC East",
        teams: [
            team("Dallas Cowboys", "Cowboys", "https://upload.wikimedia.org/wikipedia/commons/1/15/Dallas_Cowboys.svg"),
            team("Philadelphia Eagles", "Eagles", "https://upload.wikimedia.org/wikipedia/en/8/8e/Philadelphia_Eagles_logo.svg"),
            team("New York Giants", "Giants", "https://logos-world.net/wp-content/uploads/2020/05/New-York-Giants-Logo.png"),
            team("Washington Commanders", "Commanders", "https://upload.wikimedia.org/wikipedia/commons/thumb/0/0c/Washington_Commanders_logo.svg/2560px-Washington_Commanders_logo.svg.png"),
        ],
    },
    Division {
        name: "NFC South",
        teams: [
            team("Atlanta Falcons", "Falcons", "https://upload.wikimedia.org/wikipedia/en/thumb/c/c5/Atlanta_Falcons_logo.svg/1200px-Atlanta_Falcons_logo.svg.png"),
            team("Carolina Panthers", "Panthers", "https://upload.wikimedia.org/wikipedia/en/thumb/1/1c/Carolina_Panthers_logo.svg/1200px-Carolina_Panthers_logo.svg.png"),
            team("New Orleans Saints", "Saints", "https://upload.wikimedia.org/wikipedia/commons/thumb/5/50/New_Orleans_Saints_logo.svg/985px-New_Orleans_Saints_logo.svg.png"),
            team("Tampa Bay Buccaneers", "Buccaneers", "https://upload.wikimedia.org/wikipedia/en/a/a2/Tampa_Bay_Buccaneers_logo.svg"),
        ],
    },
    Division {
        name: "NFC West",
        teams: [
            team("Arizona Cardinals", "Cardinals", "https://upload.wikimedia.org/wikipedia/en/thumb/7/72/Arizona_Cardinals_logo.svg/1200px-Arizona_Cardinals_logo.svg.png"),
            team("Los Angeles Rams", "Rams", "https://upload.wikimedia.org/wikipedia/en/8/8a/Los_Angeles_Rams_logo.svg"),
            team("San Francisco 49ers", "49ers", "https://upload.wikimedia.org/wikipedia/commons/3/3a/San_Francisco_49ers_logo.svg"),
            team("Seattle Seahawks", "Seahawks", "https://upload.wikimedia.org/wikipedia/en/thumb/8/8e/Seattle_Seahawks_logo.svg/1200px-Seattle_Seahawks_logo.svg.png"),
        ],
    },
    Division {
        name: "AFC North",
        teams: [
            team("Baltimore Ravens", "Ravens", "https://upload.wikimedia.org/wikipedia/en/thumb/1/16/Baltimore_Ravens_logo.svg/1200px-Baltimore_Ravens_logo.svg.png"),
            team("Cincinnati Bengals", "Bengals", "https://upload.wikimedia.org/wikipedia/commons/8/81/Cincinnati_Bengals_logo.svg"),
            team("Cleveland Browns", "Browns", "https://upload.wikimedia.org/wikipedia/en/d/d9/Cleveland_Browns_logo.svg"),
            team("Pittsburgh Steelers", "Steelers", "https://upload.wikimedia.org/wikipedia/commons/thumb/d/de/Pittsburgh_Steelers_logo.svg/1200px-Pittsburgh_Steelers_logo.svg.png"),
        ],
    },
    Division {
        name: "AFC East",
        teams: [
            team("Buffalo Bills", "Bills", "https://upload.wikimedia.org/wikipedia/en/7/77/Buffalo_Bills_logo.svg"),
            team("Miami Dolphins", "Dolphins", "https://upload.wikimedia.org/wikipedia/en/3/37/Miami_Dolphins_logo.svg"),
            team("New England Patriots", "Patriots", "https://upload.wikimedia.org/wikipedia/en/thumb/b/b9/New_England_Patriots_logo.svg/1200px-New_England_Patriots_logo.svg.png"),
            team("New York Jets", "Jets", "https://upload.wikimedia.org/wikipedia/commons/thumb/6/69/New_York_Jets_2024.svg/1200px-New_York_Jets_2024.svg.png"),
        ],
    },
    Division {
        name: "AFC South",
        teams: [
            team("Houston Texans", "Texans", "https://upload.wikimedia.org/wikipedia/en/2/28/Houston_Texans_logo.svg"),
            team("Indianapolis Colts", "Colts", "https://upload.wikimedia.org/wikipedia/commons/thumb/0/00/Indianapolis_Colts_logo.svg/1141px-Indianapolis_Colts_logo.svg.png"),
            team("Jacksonville Jaguars", "Jaguars", "https://upload.wikimedia.org/wikipedia/en/thumb/7/74/Jacksonville_Jaguars_logo.svg/1200px-Jacksonville_Jaguars_logo.svg.png"),
            team("Tennessee Titans", "Titans", "https://upload.wikimedia.org/wikipedia/en/thumb/c/c1/Tennessee_Titans_logo.svg/1200px-Tennessee_Titans_logo.svg.png"),
        ],
    },
    Division {
        name: "AFC West",
        teams: [
            team("Denver Broncos", "Broncos", "https://upload.wikimedia.org/wikipedia/en/4/44/Denver_Broncos_logo.svg"),
            team("Kansas City Chiefs", "Chiefs", "https://upload.wikimedia.org/wikipedia/en/thumb/e/e1/Kansas_City_Chiefs_logo.svg/1200px-Kansas_City_Chiefs_logo.svg.png"),
            team("Las Vegas Raiders", "Raiders", "https://upload.wikimedia.org/wikipedia/en/thumb/4/48/Las_Vegas_Raiders_logo.svg/1130px-Las_Vegas_Raiders_logo.svg.png"),
            team("Los Angeles Chargers", "Chargers", "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a6/Los_Angeles_Chargers_logo.svg/1200px-Los_Angeles_Chargers_logo.svg.png"),
        ],
    },
];

#[function_component(Teams)]
pub fn teams() -> Html {
    let root = use_node_ref();

    // only the nav anchors apply here; they resolve to nothing and stay put
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
        <main class="teams-page" ref={root}>
            <style>{ TEAMS_CSS }</style>
            <section class="all-teams">
                <h2>{"NFL Teams"}</h2>
                <div class="divisions">
                    { for DIVISIONS.iter().map(|division| html! {
                        <div class="division">
                            <h3>{division.name}</h3>
                            <hr />
                            { for division.teams.iter().map(|team| html! {
                                <div class="team">
                                    <img src={team.logo} alt={team.short} />
                                    <h4>{team.name}</h4>
                                </div>
                            }) }
                        </div>
                    }) }
                </div>
            </section>
        </main>
    }
}

const TEAMS_CSS: &str = r#"
    .teams-page {
        max-width: 1200px;
        margin: 0 auto;
        padding: calc(var(--nav-height) + 2rem) 1.5rem 4rem;
    }
    .divisions {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
        gap: 1.5rem;
    }
    .division {
        background: #111827;
        color: #e5e7eb;
        border-radius: 12px;
        padding: 1.25rem;
    }
    .team {
        display: flex;
        align-items: center;
        gap: 0.75rem;
        margin: 0.75rem 0;
    }
    .team img {
        width: 40px;
        height: 40px;
        object-fit: contain;
    }
    .team h4 {
        margin: 0;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_has_thirty_two_distinct_teams() {
        let mut names: Vec<&str> = DIVISIONS
            .iter()
            .flat_map(|d| d.teams.iter().map(|t| t.name))
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 32);
    }

    #[test]
    fn conferences_split_evenly() {
        let nfc = DIVISIONS.iter().filter(|d| d.name.starts_with("NFC")).count();
        let afc = DIVISIONS.iter().filter(|d| d.name.starts_with("AFC")).count();
        assert_eq!((nfc, afc), (4, 4));
    }
}
